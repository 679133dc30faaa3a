//! Integration tests for the player state machine.
//!
//! Exercise the full next/previous/select flow against in-memory fakes
//! for the repository, volume store, and audio engine.

use async_trait::async_trait;
use coda_core::{
    CatalogScope, CatalogSource, PlaylistId, PlaylistListing, RepositoryError, Track, TrackId,
    TrackRepository, VolumeStore,
};
use coda_playback::{
    AudioEngine, EngineEvent, Library, PlaybackError, Player, PlayerConfig, Result,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn test_track(id: &str, title: &str) -> Arc<Track> {
    Arc::new(
        Track::new(TrackId::new(id), title, Duration::from_secs(180)).with_artist("Test Artist"),
    )
}

#[derive(Default)]
struct RepoState {
    tracks: Vec<Arc<Track>>,
    playlist: Option<PlaylistListing>,
    fail_all: bool,
    track_by_id_calls: usize,
    all_tracks_calls: usize,
}

#[derive(Clone, Default)]
struct FakeRepository {
    state: Arc<Mutex<RepoState>>,
}

impl FakeRepository {
    fn with_tracks(tracks: Vec<Arc<Track>>) -> Self {
        let repo = Self::default();
        repo.state.lock().unwrap().tracks = tracks;
        repo
    }

    fn set_failing(&self, failing: bool) {
        self.state.lock().unwrap().fail_all = failing;
    }

    fn all_tracks_calls(&self) -> usize {
        self.state.lock().unwrap().all_tracks_calls
    }

    fn track_by_id_calls(&self) -> usize {
        self.state.lock().unwrap().track_by_id_calls
    }
}

fn unreachable_error() -> RepositoryError {
    RepositoryError::Transport("connection refused".into())
}

#[async_trait]
impl TrackRepository for FakeRepository {
    async fn track_by_id(&self, id: &TrackId) -> std::result::Result<Arc<Track>, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.track_by_id_calls += 1;
        if state.fail_all {
            return Err(unreachable_error());
        }
        state
            .tracks
            .iter()
            .find(|t| &t.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::TrackNotFound(id.clone()))
    }

    async fn all_tracks(&self) -> std::result::Result<Vec<Arc<Track>>, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.all_tracks_calls += 1;
        if state.fail_all {
            return Err(unreachable_error());
        }
        Ok(state.tracks.clone())
    }

    async fn playlist(
        &self,
        id: &PlaylistId,
    ) -> std::result::Result<PlaylistListing, RepositoryError> {
        let state = self.state.lock().unwrap();
        if state.fail_all {
            return Err(unreachable_error());
        }
        state
            .playlist
            .clone()
            .ok_or_else(|| RepositoryError::PlaylistNotFound(id.clone()))
    }

    fn audio_url(&self, id: &TrackId) -> String {
        format!("fake:/songs/{id}/audio")
    }

    fn artwork_url(&self, id: &TrackId) -> String {
        format!("fake:/songs/{id}/artwork")
    }
}

#[derive(Clone, Default)]
struct FakeVolumeStore {
    saved: Arc<Mutex<Option<u8>>>,
    saves: Arc<Mutex<Vec<u8>>>,
}

#[async_trait]
impl VolumeStore for FakeVolumeStore {
    async fn load_volume(&self) -> std::result::Result<Option<u8>, RepositoryError> {
        Ok(*self.saved.lock().unwrap())
    }

    async fn save_volume(&self, level: u8) -> std::result::Result<(), RepositoryError> {
        self.saves.lock().unwrap().push(level);
        Ok(())
    }
}

struct EngineState {
    sources: Vec<String>,
    paused: bool,
    position: Duration,
    duration: Option<Duration>,
    gain: f32,
    seeks: Vec<Duration>,
    refuse_play: bool,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            paused: true,
            position: Duration::ZERO,
            duration: None,
            gain: 1.0,
            seeks: Vec::new(),
            refuse_play: false,
        }
    }
}

#[derive(Clone, Default)]
struct FakeEngine {
    state: Arc<Mutex<EngineState>>,
}

impl FakeEngine {
    fn sources(&self) -> Vec<String> {
        self.state.lock().unwrap().sources.clone()
    }

    fn seeks(&self) -> Vec<Duration> {
        self.state.lock().unwrap().seeks.clone()
    }

    fn gain(&self) -> f32 {
        self.state.lock().unwrap().gain
    }

    fn seed_duration(&self, duration: Option<Duration>) {
        self.state.lock().unwrap().duration = duration;
    }

    fn seed_position(&self, position: Duration) {
        self.state.lock().unwrap().position = position;
    }

    fn refuse_play(&self) {
        self.state.lock().unwrap().refuse_play = true;
    }
}

impl AudioEngine for FakeEngine {
    fn set_source(&mut self, url: &str) {
        let mut state = self.state.lock().unwrap();
        state.sources.push(url.to_string());
        state.position = Duration::ZERO;
        state.paused = true;
    }

    fn play(&mut self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.refuse_play {
            return Err(PlaybackError::Engine("autoplay blocked".into()));
        }
        state.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.state.lock().unwrap().paused = true;
    }

    fn set_position(&mut self, position: Duration) {
        let mut state = self.state.lock().unwrap();
        state.position = position;
        state.seeks.push(position);
    }

    fn position(&self) -> Duration {
        self.state.lock().unwrap().position
    }

    fn duration(&self) -> Option<Duration> {
        self.state.lock().unwrap().duration
    }

    fn set_gain(&mut self, gain: f32) {
        self.state.lock().unwrap().gain = gain;
    }

    fn is_paused(&self) -> bool {
        self.state.lock().unwrap().paused
    }
}

fn build_player(
    repo: &FakeRepository,
    store: &FakeVolumeStore,
    engine: &FakeEngine,
    scope: CatalogScope,
    config: PlayerConfig,
) -> Player {
    let library = Arc::new(Library::new(Arc::new(repo.clone()), scope));
    Player::new(
        library,
        Arc::new(store.clone()),
        Box::new(engine.clone()),
        config,
    )
}

fn config_with_initial(id: &str) -> PlayerConfig {
    PlayerConfig {
        initial_track: Some(TrackId::new(id)),
        ..PlayerConfig::default()
    }
}

fn current_id(player: &Player) -> TrackId {
    player.state().current_track.expect("a loaded track").id.clone()
}

#[tokio::test]
async fn start_with_initial_track_loads_it() {
    let repo = FakeRepository::with_tracks(vec![test_track("1", "First"), test_track("2", "Other")]);
    let store = FakeVolumeStore::default();
    let engine = FakeEngine::default();
    let mut player = build_player(
        &repo,
        &store,
        &engine,
        CatalogScope::AllSongs,
        config_with_initial("1"),
    );

    player.start().await;

    assert_eq!(current_id(&player), TrackId::new("1"));
    assert_eq!(player.deck().len(), 1);
    assert_eq!(player.deck().position(), Some(0));
    assert_eq!(engine.sources(), vec!["fake:/songs/1/audio".to_string()]);
    assert!(player.state().is_playing);
    assert_eq!(player.display().window_title(), "First - Test Artist | Coda");
}

#[tokio::test]
async fn start_without_initial_picks_from_catalog() {
    let repo = FakeRepository::with_tracks(vec![
        test_track("a", "A"),
        test_track("b", "B"),
        test_track("c", "C"),
    ]);
    let store = FakeVolumeStore::default();
    let engine = FakeEngine::default();
    let mut player = build_player(
        &repo,
        &store,
        &engine,
        CatalogScope::AllSongs,
        PlayerConfig::default(),
    );

    player.start().await;

    let id = current_id(&player);
    assert!(["a", "b", "c"].contains(&id.as_str()));
    assert_eq!(player.deck().len(), 1);
    assert_eq!(repo.all_tracks_calls(), 1);
}

#[tokio::test]
async fn start_failure_leaves_player_idle() {
    let repo = FakeRepository::default();
    repo.set_failing(true);
    let store = FakeVolumeStore::default();
    let engine = FakeEngine::default();
    let mut player = build_player(
        &repo,
        &store,
        &engine,
        CatalogScope::AllSongs,
        config_with_initial("1"),
    );

    player.start().await;

    assert!(player.state().current_track.is_none());
    assert!(player.deck().is_empty());
    assert!(engine.sources().is_empty());
    assert!(!player.state().is_playing);
}

#[tokio::test]
async fn start_restores_saved_volume() {
    let repo = FakeRepository::with_tracks(vec![test_track("1", "First")]);
    let store = FakeVolumeStore::default();
    *store.saved.lock().unwrap() = Some(40);
    let engine = FakeEngine::default();
    let mut player = build_player(
        &repo,
        &store,
        &engine,
        CatalogScope::AllSongs,
        config_with_initial("1"),
    );

    player.start().await;

    assert_eq!(player.state().volume, 40);
    assert!((engine.gain() - 0.4).abs() < 1e-6);
}

#[tokio::test]
async fn lookahead_replays_without_fetching() {
    let repo = FakeRepository::with_tracks(vec![test_track("a", "A"), test_track("b", "B")]);
    let store = FakeVolumeStore::default();
    let engine = FakeEngine::default();
    let mut player = build_player(
        &repo,
        &store,
        &engine,
        CatalogScope::AllSongs,
        config_with_initial("a"),
    );

    player.start().await;
    player.select_track(&TrackId::new("b")).await.unwrap();
    player.play_prev().unwrap();
    assert_eq!(current_id(&player), TrackId::new("a"));

    let fetches_before = (repo.track_by_id_calls(), repo.all_tracks_calls());
    player.play_next().await.unwrap();

    assert_eq!(current_id(&player), TrackId::new("b"));
    assert_eq!(
        (repo.track_by_id_calls(), repo.all_tracks_calls()),
        fetches_before,
        "deck lookahead must not hit the repository"
    );
}

#[tokio::test]
async fn sequential_next_wraps_to_catalog_start() {
    let repo = FakeRepository::with_tracks(vec![
        test_track("a", "A"),
        test_track("b", "B"),
        test_track("c", "C"),
    ]);
    let store = FakeVolumeStore::default();
    let engine = FakeEngine::default();
    let config = PlayerConfig {
        shuffle: false,
        ..config_with_initial("c")
    };
    let mut player = build_player(&repo, &store, &engine, CatalogScope::AllSongs, config);

    player.start().await;
    player.play_next().await.unwrap();

    assert_eq!(current_id(&player), TrackId::new("a"));
    assert_eq!(player.deck().len(), 2);
    assert_eq!(player.deck().position(), Some(1));
}

#[tokio::test]
async fn shuffle_next_appends_a_catalog_track() {
    let repo = FakeRepository::with_tracks(vec![
        test_track("a", "A"),
        test_track("b", "B"),
        test_track("c", "C"),
    ]);
    let store = FakeVolumeStore::default();
    let engine = FakeEngine::default();
    let mut player = build_player(
        &repo,
        &store,
        &engine,
        CatalogScope::AllSongs,
        PlayerConfig::default(),
    );

    player.start().await;
    player.play_next().await.unwrap();

    assert_eq!(player.deck().len(), 2);
    assert!(["a", "b", "c"].contains(&current_id(&player).as_str()));
    // Catalog is fetched once and cached.
    assert_eq!(repo.all_tracks_calls(), 1);
}

#[tokio::test]
async fn failed_advance_keeps_current_track_playing() {
    let repo = FakeRepository::with_tracks(vec![test_track("a", "A")]);
    let store = FakeVolumeStore::default();
    let engine = FakeEngine::default();
    let mut player = build_player(
        &repo,
        &store,
        &engine,
        CatalogScope::AllSongs,
        config_with_initial("a"),
    );

    player.start().await;
    repo.set_failing(true);

    let err = player.play_next().await.unwrap_err();
    assert!(matches!(err, PlaybackError::Repository(_)));

    assert_eq!(current_id(&player), TrackId::new("a"));
    assert_eq!(player.deck().len(), 1);
    assert!(player.state().is_playing);

    // The busy flag must clear even on failure.
    assert!(!player.is_busy());
    repo.set_failing(false);
    player.play_next().await.unwrap();
    assert_eq!(player.deck().len(), 2);
}

#[tokio::test]
async fn prev_at_first_entry_replays_it() {
    let repo = FakeRepository::with_tracks(vec![test_track("a", "A")]);
    let store = FakeVolumeStore::default();
    let engine = FakeEngine::default();
    let mut player = build_player(
        &repo,
        &store,
        &engine,
        CatalogScope::AllSongs,
        config_with_initial("a"),
    );

    player.start().await;
    player.play_prev().unwrap();

    assert_eq!(player.deck().position(), Some(0));
    // The same source is loaded again, restarting from the top.
    assert_eq!(
        engine.sources(),
        vec![
            "fake:/songs/a/audio".to_string(),
            "fake:/songs/a/audio".to_string()
        ]
    );
}

#[tokio::test]
async fn prev_with_empty_deck_is_an_error() {
    let repo = FakeRepository::default();
    let store = FakeVolumeStore::default();
    let engine = FakeEngine::default();
    let mut player = build_player(
        &repo,
        &store,
        &engine,
        CatalogScope::AllSongs,
        PlayerConfig::default(),
    );

    assert!(matches!(
        player.play_prev(),
        Err(PlaybackError::NoTrackLoaded)
    ));
}

#[tokio::test]
async fn selection_discards_forward_history() {
    let repo = FakeRepository::with_tracks(vec![
        test_track("a", "A"),
        test_track("b", "B"),
        test_track("c", "C"),
        test_track("d", "D"),
    ]);
    let store = FakeVolumeStore::default();
    let engine = FakeEngine::default();
    let mut player = build_player(
        &repo,
        &store,
        &engine,
        CatalogScope::AllSongs,
        config_with_initial("a"),
    );

    player.start().await;
    player.select_track(&TrackId::new("b")).await.unwrap();
    player.select_track(&TrackId::new("c")).await.unwrap();
    player.play_prev().unwrap();
    player.play_prev().unwrap();
    assert_eq!(player.deck().position(), Some(0));

    player.select_track(&TrackId::new("d")).await.unwrap();

    let ids: Vec<_> = player.deck().iter().map(|t| t.id.as_str().to_string()).collect();
    assert_eq!(ids, vec!["a", "d"]);
    assert_eq!(player.deck().position(), Some(1));
}

#[tokio::test]
async fn selection_keeps_deck_at_cap() {
    let repo = FakeRepository::with_tracks(vec![
        test_track("a", "A"),
        test_track("b", "B"),
        test_track("c", "C"),
        test_track("d", "D"),
        test_track("e", "E"),
    ]);
    let store = FakeVolumeStore::default();
    let engine = FakeEngine::default();
    let config = PlayerConfig {
        deck_cap: 3,
        ..config_with_initial("a")
    };
    let mut player = build_player(&repo, &store, &engine, CatalogScope::AllSongs, config);

    player.start().await;
    for id in ["b", "c", "d", "e"] {
        player.select_track(&TrackId::new(id)).await.unwrap();
        // After every selection the cursor sits on the newest entry.
        assert_eq!(player.deck().position(), Some(player.deck().len() - 1));
        assert!(player.deck().len() <= 3);
    }

    let ids: Vec<_> = player.deck().iter().map(|t| t.id.as_str().to_string()).collect();
    assert_eq!(ids, vec!["c", "d", "e"]);
}

#[tokio::test]
async fn selecting_a_track_outside_the_catalog_fails() {
    let repo = FakeRepository::with_tracks(vec![test_track("a", "A")]);
    let store = FakeVolumeStore::default();
    let engine = FakeEngine::default();
    let mut player = build_player(
        &repo,
        &store,
        &engine,
        CatalogScope::AllSongs,
        config_with_initial("a"),
    );

    player.start().await;
    let err = player.select_track(&TrackId::new("zz")).await.unwrap_err();
    assert!(matches!(err, PlaybackError::Catalog(_)));
    assert_eq!(current_id(&player), TrackId::new("a"));
}

#[tokio::test]
async fn ended_event_advances_into_lookahead() {
    let repo = FakeRepository::with_tracks(vec![test_track("a", "A"), test_track("b", "B")]);
    let store = FakeVolumeStore::default();
    let engine = FakeEngine::default();
    let mut player = build_player(
        &repo,
        &store,
        &engine,
        CatalogScope::AllSongs,
        config_with_initial("a"),
    );

    player.start().await;
    player.select_track(&TrackId::new("b")).await.unwrap();
    player.play_prev().unwrap();

    player.handle_event(EngineEvent::Ended).await;

    assert_eq!(current_id(&player), TrackId::new("b"));
}

#[tokio::test]
async fn playing_and_paused_events_sync_state() {
    let repo = FakeRepository::with_tracks(vec![test_track("a", "A")]);
    let store = FakeVolumeStore::default();
    let engine = FakeEngine::default();
    let mut player = build_player(
        &repo,
        &store,
        &engine,
        CatalogScope::AllSongs,
        config_with_initial("a"),
    );

    player.start().await;
    player.handle_event(EngineEvent::Paused).await;
    assert!(!player.state().is_playing);
    assert!(!player.display().playing());

    player.handle_event(EngineEvent::Playing).await;
    assert!(player.state().is_playing);
    assert!(player.display().playing());
}

#[tokio::test]
async fn time_update_refreshes_progress_line() {
    let repo = FakeRepository::with_tracks(vec![test_track("a", "A")]);
    let store = FakeVolumeStore::default();
    let engine = FakeEngine::default();
    let mut player = build_player(
        &repo,
        &store,
        &engine,
        CatalogScope::AllSongs,
        config_with_initial("a"),
    );

    player.start().await;
    engine.seed_duration(Some(Duration::from_secs(100)));
    engine.seed_position(Duration::from_secs(30));

    player.handle_event(EngineEvent::TimeUpdate).await;
    assert_eq!(player.display().progress(), "0:30 / 1:40");
}

#[tokio::test]
async fn engine_refusal_shows_paused_state() {
    let repo = FakeRepository::with_tracks(vec![test_track("a", "A")]);
    let store = FakeVolumeStore::default();
    let engine = FakeEngine::default();
    engine.refuse_play();
    let mut player = build_player(
        &repo,
        &store,
        &engine,
        CatalogScope::AllSongs,
        config_with_initial("a"),
    );

    player.start().await;

    // The track is loaded and displayed, but playback shows paused.
    assert_eq!(current_id(&player), TrackId::new("a"));
    assert!(!player.state().is_playing);
    assert!(!player.display().playing());
}

#[tokio::test]
async fn toggle_play_flips_engine_and_state() {
    let repo = FakeRepository::with_tracks(vec![test_track("a", "A")]);
    let store = FakeVolumeStore::default();
    let engine = FakeEngine::default();
    let mut player = build_player(
        &repo,
        &store,
        &engine,
        CatalogScope::AllSongs,
        config_with_initial("a"),
    );

    player.start().await;
    assert!(player.state().is_playing);

    player.toggle_play();
    assert!(!player.state().is_playing);

    player.toggle_play();
    assert!(player.state().is_playing);
}

#[tokio::test]
async fn seek_is_ignored_before_metadata_loads() {
    let repo = FakeRepository::with_tracks(vec![test_track("a", "A")]);
    let store = FakeVolumeStore::default();
    let engine = FakeEngine::default();
    let mut player = build_player(
        &repo,
        &store,
        &engine,
        CatalogScope::AllSongs,
        config_with_initial("a"),
    );

    player.start().await;
    player.seek_fraction(0.5);

    assert!(engine.seeks().is_empty());
}

#[tokio::test]
async fn seek_targets_a_fraction_of_the_duration() {
    let repo = FakeRepository::with_tracks(vec![test_track("a", "A")]);
    let store = FakeVolumeStore::default();
    let engine = FakeEngine::default();
    let mut player = build_player(
        &repo,
        &store,
        &engine,
        CatalogScope::AllSongs,
        config_with_initial("a"),
    );

    player.start().await;
    engine.seed_duration(Some(Duration::from_secs(200)));

    player.seek_fraction(0.25);
    assert_eq!(engine.seeks(), vec![Duration::from_secs(50)]);

    // A non-finite fraction must not reach the engine.
    player.seek_fraction(f64::NAN);
    assert_eq!(engine.seeks().len(), 1);

    // Overshoot clamps to the end.
    player.seek_fraction(2.0);
    assert_eq!(engine.seeks()[1], Duration::from_secs(200));
}

#[tokio::test]
async fn volume_controls_drive_the_engine_gain() {
    let repo = FakeRepository::with_tracks(vec![test_track("a", "A")]);
    let store = FakeVolumeStore::default();
    let engine = FakeEngine::default();
    let mut player = build_player(
        &repo,
        &store,
        &engine,
        CatalogScope::AllSongs,
        config_with_initial("a"),
    );

    player.start().await;
    player.set_volume(60);
    assert!((engine.gain() - 0.6).abs() < 1e-6);

    player.toggle_mute();
    assert_eq!(engine.gain(), 0.0);
    assert!(player.state().muted);
    assert_eq!(player.state().volume, 60, "mute preserves the level");

    player.toggle_mute();
    assert!((engine.gain() - 0.6).abs() < 1e-6);
    assert!(!player.state().muted);

    player.commit_volume().await;
    assert_eq!(*store.saves.lock().unwrap(), vec![60]);
}

#[tokio::test]
async fn toggle_shuffle_flips_the_mode() {
    let repo = FakeRepository::default();
    let store = FakeVolumeStore::default();
    let engine = FakeEngine::default();
    let mut player = build_player(
        &repo,
        &store,
        &engine,
        CatalogScope::AllSongs,
        PlayerConfig::default(),
    );

    assert!(player.shuffle());
    assert!(!player.toggle_shuffle());
    assert!(player.toggle_shuffle());
}

#[tokio::test]
async fn playlist_scope_loads_playlist_catalog() {
    let repo = FakeRepository::default();
    repo.state.lock().unwrap().playlist = Some(PlaylistListing {
        name: "Late Night".to_string(),
        owner_name: "ana".to_string(),
        tracks: vec![test_track("p1", "P1"), test_track("p2", "P2")],
    });
    let library = Arc::new(Library::new(
        Arc::new(repo.clone()),
        CatalogScope::Playlist(PlaylistId::new("5")),
    ));

    let catalog = library.catalog().await.unwrap();
    assert_eq!(catalog.len(), 2);
    assert!(matches!(catalog.source(), CatalogSource::Playlist { .. }));
    assert_eq!(
        library.banner().await.unwrap(),
        "You're listening to Late Night by ana"
    );
}

#[tokio::test]
async fn missing_playlist_falls_back_to_all_songs() {
    let repo = FakeRepository::with_tracks(vec![test_track("a", "A"), test_track("b", "B")]);
    let library = Arc::new(Library::new(
        Arc::new(repo.clone()),
        CatalogScope::Playlist(PlaylistId::new("gone")),
    ));

    let catalog = library.catalog().await.unwrap();
    assert_eq!(catalog.len(), 2);
    assert!(matches!(catalog.source(), CatalogSource::AllSongs));
    assert_eq!(
        library.banner().await.unwrap(),
        "You're listening to all songs."
    );
    assert_eq!(repo.all_tracks_calls(), 1);
}
