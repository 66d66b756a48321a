/// Headless session tests
/// Runs whole queues through the surface on the simulated handle
use podcastr_cli::{load_episodes, run_session, CliConfig, CliError};
use podcastr_playback::{Episode, PlaybackConfig, PlaybackEvent};
use std::io::Write;

fn create_episode(title: &str, duration: u64) -> Episode {
    Episode {
        title: title.to_string(),
        members: "Diego e Richard".to_string(),
        thumbnail: format!("https://cdn.example.com/{}.jpg", title),
        duration,
        url: format!("https://cdn.example.com/{}.m4a", title),
    }
}

fn fast_config() -> CliConfig {
    CliConfig {
        seconds_per_tick: 15.0,
        max_ticks: 50,
        ..Default::default()
    }
}

/// Test a two-episode queue plays through and clears
#[test]
fn test_queue_runs_to_completion() {
    let episodes = vec![create_episode("A", 30), create_episode("B", 45)];

    let report = run_session(episodes, 0, &fast_config());

    assert!(report.finished);
    // B's first tick is rewound when it reports loaded
    assert_eq!(report.ticks, 6);
    assert_eq!(report.episodes_started(), 2);
    assert!(report.final_view.episode.is_none());
    assert!(report.final_view.all_disabled());
    assert_eq!(
        report.events.first(),
        Some(&PlaybackEvent::QueueReplaced {
            length: 2,
            index: 0
        })
    );
    assert_eq!(report.events.last(), Some(&PlaybackEvent::Cleared));
    assert!(report
        .events
        .contains(&PlaybackEvent::IndexChanged { from: 0, to: 1 }));
}

/// Test starting past the end of the queue finishes immediately
#[test]
fn test_out_of_range_index_finishes_without_ticking() {
    let episodes = vec![create_episode("A", 30), create_episode("B", 45)];

    let report = run_session(episodes, 5, &fast_config());

    assert!(report.finished);
    assert_eq!(report.ticks, 0);
    assert!(report.final_view.episode.is_none());
}

/// Test a looping episode is cut off by the tick budget
#[test]
fn test_looping_stops_at_tick_budget() {
    let config = CliConfig {
        max_ticks: 20,
        playback: PlaybackConfig {
            start_looping: true,
            ..Default::default()
        },
        ..fast_config()
    };

    let report = run_session(vec![create_episode("A", 30)], 0, &config);

    assert!(!report.finished);
    assert_eq!(report.ticks, 20);
    assert_eq!(report.episodes_started(), 1);
    assert_eq!(
        report.final_view.episode.as_ref().map(|e| e.title.as_str()),
        Some("A")
    );
    assert!(report.final_view.repeat.active);
}

/// Test a seeded shuffle session is reproducible
#[test]
fn test_seeded_shuffle_is_deterministic() {
    let episodes: Vec<Episode> = (0..6)
        .map(|i| create_episode(&format!("ep{}", i), 15))
        .collect();
    let config = CliConfig {
        max_ticks: 30,
        playback: PlaybackConfig {
            start_shuffling: true,
            shuffle_seed: Some(7),
            ..Default::default()
        },
        ..fast_config()
    };

    let first = run_session(episodes.clone(), 0, &config);
    let second = run_session(episodes, 0, &config);

    // Shuffle always has a next episode, so only the budget stops it
    assert!(!first.finished);
    assert_eq!(first.events, second.events);
}

/// Test episode files are read as JSON arrays
#[test]
fn test_load_episodes_from_file() {
    let episodes = vec![create_episode("A", 30), create_episode("B", 45)];
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let json = serde_json::to_string(&episodes).unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let loaded = load_episodes(file.path()).unwrap();

    assert_eq!(loaded, episodes);
}

/// Test malformed and missing episode files are reported
#[test]
fn test_load_episodes_errors() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{\"title\": \"not a list\"}").unwrap();

    assert!(matches!(
        load_episodes(file.path()),
        Err(CliError::Episodes(_))
    ));

    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_episodes(&dir.path().join("missing.json")),
        Err(CliError::Io(_))
    ));
}
