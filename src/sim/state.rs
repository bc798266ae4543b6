//! Page state and the operations that drive it
//!
//! Everything the page remembers lives here: the scene, the three games, the
//! rizz counter and the page's own timers. Operations never touch the DOM;
//! they queue `PageEvent`s for the platform layer to render.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::EntityId;
use super::game::{GameEvent, GameKind, TimedEntityGame};
use super::proposal::ProposalButtons;
use super::reward::RewardCounter;
use super::scene::{Nav, Scene, SceneEffect, SceneStack, Transition};
use super::session::SessionEnd;
use super::timer::{Fired, Timers};
use crate::audio::{Clip, Cue, PageSound};
use crate::consts::*;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Cat symbols thrown by the paw button
const PAW_SYMBOLS: [&str; 5] = ["🐱", "🐾", "🐈", "😺", "😻"];

/// A short-lived paw particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: u32,
    pub symbol: &'static str,
    /// Travel from the paw centre (px)
    pub offset: Vec2,
}

/// Output for the platform layer, in the order things happened
#[derive(Debug, Clone)]
pub enum PageEvent {
    SceneChanged { scene: Scene, back_visible: bool },
    Game { kind: GameKind, event: GameEvent },
    Cue(Cue),
    Clip(Clip),
    PageSound(PageSound),
    Toast { text: String, duration_ms: u64 },
    RizzChanged { value: u64 },
    ProposalChanged(ProposalButtons),
    ReplayChanged { remaining: u32 },
    OverlayChanged { open: bool },
    PawBurst(Vec<Particle>),
    ParticleExpired(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageTimer {
    ResumeAmbient,
    CloseOverlay,
    ParticleFade(u32),
}

/// The whole page
#[derive(Debug, Clone)]
pub struct PageState {
    now_ms: u64,
    scene: SceneStack,
    ambient: TimedEntityGame,
    hearts: TimedEntityGame,
    balloons: TimedEntityGame,
    overlay_open: bool,
    rizz: RewardCounter,
    proposal: ProposalButtons,
    replay_remaining: u32,
    particles: Vec<Particle>,
    next_particle_id: u32,
    paw_clips: usize,
    timers: Timers<PageTimer>,
    rng: Pcg32,
    events: Vec<PageEvent>,
    torn_down: bool,
}

impl PageState {
    pub fn new(seed: u64, settings: &Settings) -> Self {
        let tuning = Tuning::with_overrides(&settings.tuning);
        Self {
            now_ms: 0,
            scene: SceneStack::new(),
            ambient: TimedEntityGame::new(GameKind::Ambient, tuning.ambient, seed),
            hearts: TimedEntityGame::new(GameKind::Hearts, tuning.hearts, seed),
            balloons: TimedEntityGame::new(GameKind::Balloons, tuning.balloons, seed),
            overlay_open: false,
            rizz: RewardCounter::new(),
            proposal: ProposalButtons::default(),
            replay_remaining: settings.replay_allowance,
            particles: Vec::new(),
            next_particle_id: 1,
            paw_clips: settings.paw_clips.len(),
            timers: Timers::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            torn_down: false,
        }
    }

    // === Queries ===

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn scene(&self) -> Scene {
        self.scene.current()
    }

    pub fn back_visible(&self) -> bool {
        self.scene.back_visible()
    }

    pub fn game(&self, kind: GameKind) -> &TimedEntityGame {
        match kind {
            GameKind::Ambient => &self.ambient,
            GameKind::Hearts => &self.hearts,
            GameKind::Balloons => &self.balloons,
        }
    }

    fn game_mut(&mut self, kind: GameKind) -> &mut TimedEntityGame {
        match kind {
            GameKind::Ambient => &mut self.ambient,
            GameKind::Hearts => &mut self.hearts,
            GameKind::Balloons => &mut self.balloons,
        }
    }

    pub fn overlay_open(&self) -> bool {
        self.overlay_open
    }

    pub fn rizz(&self) -> u64 {
        self.rizz.value()
    }

    pub fn proposal(&self) -> ProposalButtons {
        self.proposal
    }

    pub fn replay_remaining(&self) -> u32 {
        self.replay_remaining
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Every timer still outstanding: the page's own plus each game's
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
            + GameKind::ALL
                .iter()
                .map(|k| self.game(*k).pending_timers())
                .sum::<usize>()
    }

    /// Hand queued events to the platform layer
    pub fn drain_events(&mut self) -> Vec<PageEvent> {
        std::mem::take(&mut self.events)
    }

    // === Operations ===

    /// Navigate the scene stack, running the transition's side effects
    pub fn navigate(&mut self, nav: Nav) -> Option<Transition> {
        let transition = self.scene.navigate(nav)?;
        log::info!(
            "Scene {:?} -> {:?} ({:?})",
            transition.from,
            transition.to,
            nav
        );
        self.events.push(PageEvent::SceneChanged {
            scene: transition.to,
            back_visible: self.scene.back_visible(),
        });
        for effect in transition.effects {
            self.run_effect(*effect);
        }
        Some(transition)
    }

    /// "Yes"
    pub fn accept(&mut self) -> bool {
        self.navigate(Nav::Accept).is_some()
    }

    /// "No": the buttons react, nothing else happens
    pub fn dodge(&mut self) {
        if self.scene.current() != Scene::Proposal {
            return;
        }
        self.proposal.dodge();
        self.events.push(PageEvent::ProposalChanged(self.proposal));
        self.events.push(PageEvent::PageSound(PageSound::No));
    }

    /// Replay the acceptance clip while allowance remains
    pub fn replay(&mut self) -> bool {
        if self.replay_remaining == 0 {
            return false;
        }
        self.replay_remaining -= 1;
        self.events.push(PageEvent::Clip(Clip::Acceptance));
        self.events.push(PageEvent::ReplayChanged {
            remaining: self.replay_remaining,
        });
        true
    }

    pub fn back(&mut self) -> bool {
        self.navigate(Nav::Back).is_some()
    }

    /// Escape: close the overlay first, otherwise go back where allowed
    pub fn cancel(&mut self) -> bool {
        if self.overlay_open {
            self.close_secret();
            true
        } else if self.scene.back_visible() {
            self.back()
        } else {
            false
        }
    }

    /// Catch gesture on an entity of one of the games
    pub fn catch(&mut self, kind: GameKind, id: EntityId) -> bool {
        let now = self.now_ms;
        let mut events = Vec::new();
        let caught = self.game_mut(kind).catch(id, now, &mut events);
        self.route(kind, events);
        caught
    }

    /// Show the balloon overlay and start popping
    pub fn open_secret(&mut self) {
        if !self.overlay_open {
            self.overlay_open = true;
            self.events.push(PageEvent::OverlayChanged { open: true });
        }
        self.timers.cancel_where(|t| *t == PageTimer::CloseOverlay);
        self.start_game(GameKind::Balloons);
    }

    /// Close button: stop the balloons and hide the overlay
    pub fn close_secret(&mut self) {
        self.stop_game(GameKind::Balloons);
        self.timers.cancel_where(|t| *t == PageTimer::CloseOverlay);
        self.hide_overlay();
    }

    /// Paw button: page sound, a random clip and a burst of particles
    pub fn paw(&mut self) {
        self.events.push(PageEvent::PageSound(PageSound::Meow));
        if self.paw_clips > 0 {
            let idx = self.rng.random_range(0..self.paw_clips);
            self.events.push(PageEvent::Clip(Clip::Paw(idx)));
        }

        let half = PAW_SPREAD / 2.0;
        let mut burst = Vec::with_capacity(PAW_PARTICLES);
        for _ in 0..PAW_PARTICLES {
            let id = self.next_particle_id;
            self.next_particle_id += 1;
            let particle = Particle {
                id,
                symbol: PAW_SYMBOLS[self.rng.random_range(0..PAW_SYMBOLS.len())],
                offset: Vec2::new(
                    self.rng.random_range(-half..=half),
                    self.rng.random_range(-PAW_SPREAD..=0.0),
                ),
            };
            self.timers
                .after(self.now_ms, PAW_PARTICLE_LIFE_MS, PageTimer::ParticleFade(id));
            burst.push(particle.clone());
            self.particles.push(particle);
        }
        self.events.push(PageEvent::PawBurst(burst));
    }

    /// Adjust the rizz counter, optionally announcing it
    pub fn award(&mut self, delta: i64, label: Option<&str>) -> u64 {
        let value = self.rizz.adjust(delta);
        self.events.push(PageEvent::RizzChanged { value });
        if let Some(label) = label {
            self.events.push(PageEvent::Toast {
                text: format!("{} +{} Rizz", label, delta),
                duration_ms: REWARD_TOAST_MS,
            });
        }
        value
    }

    /// Move the clock forward and fire everything that came due
    pub fn advance(&mut self, dt_ms: u64) {
        if self.torn_down {
            return;
        }
        self.now_ms = self.now_ms.saturating_add(dt_ms);
        let now = self.now_ms;

        // Page timers split the frame so games started by one run from its
        // deadline, not from the end of the frame
        loop {
            let until = self.timers.next_deadline().filter(|d| *d < now).unwrap_or(now);
            for kind in GameKind::ALL {
                let mut events = Vec::new();
                self.game_mut(kind).advance(until, &mut events);
                self.route(kind, events);
            }
            while let Some(fired) = self.timers.pop_due(until) {
                self.fire(fired);
            }
            if until == now {
                break;
            }
        }
    }

    fn fire(&mut self, Fired { at, key, .. }: Fired<PageTimer>) {
        match key {
            PageTimer::ResumeAmbient => {
                if self.scene.current() == Scene::Reward {
                    self.start_game_at(GameKind::Ambient, at);
                }
            }
            PageTimer::CloseOverlay => self.hide_overlay(),
            PageTimer::ParticleFade(id) => {
                self.particles.retain(|p| p.id != id);
                self.events.push(PageEvent::ParticleExpired(id));
            }
        }
    }

    /// Page is going away: stop every game and drop every timer
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        let now = self.now_ms;
        let mut stopped = 0;
        for kind in GameKind::ALL {
            // Results are irrelevant once the page is unloading
            let mut events = Vec::new();
            if self.game_mut(kind).stop(now, &mut events).is_some() {
                stopped += 1;
            }
        }
        let cancelled = self.timers.clear();
        self.particles.clear();
        self.events.clear();
        self.torn_down = true;
        log::info!("Teardown: {} games stopped, {} page timers cancelled", stopped, cancelled);
    }

    // === Internals ===

    fn start_game(&mut self, kind: GameKind) {
        self.start_game_at(kind, self.now_ms);
    }

    fn start_game_at(&mut self, kind: GameKind, at: u64) {
        let mut events = Vec::new();
        self.game_mut(kind).start(at, &mut events);
        self.route(kind, events);
    }

    fn stop_game(&mut self, kind: GameKind) {
        let now = self.now_ms;
        let mut events = Vec::new();
        self.game_mut(kind).stop(now, &mut events);
        self.route(kind, events);
    }

    fn hide_overlay(&mut self) {
        if self.overlay_open {
            self.overlay_open = false;
            self.events.push(PageEvent::OverlayChanged { open: false });
        }
    }

    fn run_effect(&mut self, effect: SceneEffect) {
        match effect {
            SceneEffect::AwardAcceptance => {
                self.award(ACCEPT_REWARD, Some("Yes senpai"));
            }
            SceneEffect::PlayAcceptanceClip => self.events.push(PageEvent::Clip(Clip::Acceptance)),
            SceneEffect::StartAmbient => self.start_game(GameKind::Ambient),
            SceneEffect::StopAmbient => self.stop_game(GameKind::Ambient),
            SceneEffect::StartCatchGame => self.start_game(GameKind::Hearts),
            SceneEffect::StopCatchGame => self.stop_game(GameKind::Hearts),
            SceneEffect::ScheduleAmbientResume => {
                self.timers.cancel_where(|t| *t == PageTimer::ResumeAmbient);
                self.timers
                    .after(self.now_ms, AMBIENT_RESUME_DELAY_MS, PageTimer::ResumeAmbient);
            }
            SceneEffect::CancelAmbientResume => {
                self.timers.cancel_where(|t| *t == PageTimer::ResumeAmbient);
            }
        }
    }

    /// Forward a game's events and react to the ones the page cares about
    fn route(&mut self, kind: GameKind, events: Vec<GameEvent>) {
        for event in events {
            self.events.push(PageEvent::Game {
                kind,
                event: event.clone(),
            });
            match event {
                GameEvent::Caught { cue, .. } => {
                    self.events.push(PageEvent::Cue(cue));
                    match kind {
                        GameKind::Ambient => {
                            self.navigate(Nav::EnterGame);
                        }
                        GameKind::Hearts => {
                            self.award(HEART_REWARD, Some("Heart"));
                        }
                        GameKind::Balloons => {}
                    }
                }
                GameEvent::Finished(report) => match kind {
                    GameKind::Hearts => self.events.push(PageEvent::Toast {
                        text: format!("You collected {} hearts 💖", report.score),
                        duration_ms: SUMMARY_TOAST_MS,
                    }),
                    GameKind::Balloons if report.won => {
                        self.events.push(PageEvent::Toast {
                            text: "Secret unlocked! ✨ Rizz level ++".to_string(),
                            duration_ms: SUMMARY_TOAST_MS,
                        });
                        self.award(SECRET_REWARD, Some("Secret unlocked"));
                        self.timers
                            .after(self.now_ms, OVERLAY_CLOSE_DELAY_MS, PageTimer::CloseOverlay);
                    }
                    GameKind::Balloons if report.end == SessionEnd::Timeout => {
                        log::info!("Balloons timed out with {} popped", report.score);
                    }
                    _ => {}
                },
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageState {
        PageState::new(1234, &Settings::default())
    }

    /// Advance in frame-sized steps
    fn run_for(state: &mut PageState, ms: u64) {
        let mut left = ms;
        while left > 0 {
            let step = left.min(16);
            state.advance(step);
            left -= step;
        }
    }

    fn first_live(state: &PageState, kind: GameKind) -> Option<EntityId> {
        state.game(kind).entities().first().map(|e| e.id)
    }

    fn toasts(events: &[PageEvent]) -> Vec<String> {
        events
            .iter()
            .filter_map(|e| match e {
                PageEvent::Toast { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_accept_rewards_and_starts_ambient() {
        let mut state = page();
        assert!(state.accept());
        assert_eq!(state.scene(), Scene::Reward);
        assert_eq!(state.rizz(), ACCEPT_REWARD as u64);
        assert!(state.game(GameKind::Ambient).is_running());

        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(e, PageEvent::Clip(Clip::Acceptance))));
        assert_eq!(toasts(&events), vec!["Yes senpai +100 Rizz"]);

        // Only once
        assert!(!state.accept());
        assert_eq!(state.rizz(), 100);
    }

    #[test]
    fn test_ambient_catch_enters_game() {
        let mut state = page();
        state.accept();
        run_for(&mut state, 600);
        let id = first_live(&state, GameKind::Ambient).unwrap();
        state.drain_events();

        assert!(state.catch(GameKind::Ambient, id));
        assert_eq!(state.scene(), Scene::CatchGame);
        assert!(!state.game(GameKind::Ambient).is_running());
        assert!(state.game(GameKind::Ambient).entities().is_empty());
        assert!(state.game(GameKind::Hearts).is_running());
        assert!(state.back_visible());

        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(e, PageEvent::Cue(Cue::AmbientBeep))));
    }

    #[test]
    fn test_heart_catch_awards_rizz() {
        let mut state = page();
        state.accept();
        state.navigate(Nav::EnterGame);
        run_for(&mut state, 700);
        let id = first_live(&state, GameKind::Hearts).unwrap();

        assert!(state.catch(GameKind::Hearts, id));
        assert_eq!(state.game(GameKind::Hearts).score(), 1);
        assert_eq!(state.rizz(), 110);
        assert!(!state.catch(GameKind::Hearts, id));
        assert_eq!(state.rizz(), 110);
    }

    #[test]
    fn test_catch_game_times_out() {
        let mut state = page();
        state.accept();
        state.navigate(Nav::EnterGame);
        state.drain_events();

        run_for(&mut state, 60_000);
        let hearts = state.game(GameKind::Hearts);
        assert!(!hearts.is_running());
        assert_eq!(hearts.last_report().unwrap().score, 0);
        assert_eq!(hearts.pending_timers(), 0);
        assert!(toasts(&state.drain_events()).contains(&"You collected 0 hearts 💖".to_string()));
        // Timing out does not navigate
        assert_eq!(state.scene(), Scene::CatchGame);
    }

    #[test]
    fn test_balloon_quota_grants_bonus_once() {
        let mut state = page();
        state.open_secret();
        assert!(state.overlay_open());

        let mut pops = 0;
        while state.game(GameKind::Balloons).is_running() {
            match first_live(&state, GameKind::Balloons) {
                Some(id) => {
                    assert!(state.catch(GameKind::Balloons, id));
                    pops += 1;
                }
                None => state.advance(50),
            }
        }
        assert_eq!(pops, 10);
        let report = state.game(GameKind::Balloons).last_report().unwrap().clone();
        assert!(report.won);
        assert_eq!(state.rizz(), SECRET_REWARD as u64);

        let events = state.drain_events();
        let wins = events
            .iter()
            .filter(|e| matches!(e, PageEvent::Game { event: GameEvent::Finished(r), .. } if r.won))
            .count();
        assert_eq!(wins, 1);
        assert!(toasts(&events).contains(&"Secret unlocked +500 Rizz".to_string()));

        // Overlay closes after a short delay
        assert!(state.overlay_open());
        state.advance(OVERLAY_CLOSE_DELAY_MS);
        assert!(!state.overlay_open());
        assert_eq!(state.pending_timers(), 0);
    }

    #[test]
    fn test_balloon_timeout_keeps_overlay() {
        let mut state = page();
        state.open_secret();
        run_for(&mut state, 30_000);
        let report = state.game(GameKind::Balloons).last_report().unwrap();
        assert_eq!(report.end, SessionEnd::Timeout);
        assert!(!report.won);
        assert_eq!(state.rizz(), 0);
        assert!(state.overlay_open());
        assert!(state.cancel());
        assert!(!state.overlay_open());
    }

    #[test]
    fn test_reopen_secret_does_not_restart() {
        let mut state = page();
        state.open_secret();
        run_for(&mut state, 100);
        let id = first_live(&state, GameKind::Balloons).unwrap();
        state.catch(GameKind::Balloons, id);
        state.open_secret();
        assert_eq!(state.game(GameKind::Balloons).score(), 1);
    }

    #[test]
    fn test_escape_closes_overlay_before_going_back() {
        let mut state = page();
        state.accept();
        state.navigate(Nav::EnterGame);
        state.open_secret();

        assert!(state.cancel());
        assert!(!state.overlay_open());
        assert!(!state.game(GameKind::Balloons).is_running());
        assert_eq!(state.scene(), Scene::CatchGame);

        assert!(state.cancel());
        assert_eq!(state.scene(), Scene::Reward);

        // No back control on the reward screen
        assert!(!state.cancel());
        assert_eq!(state.scene(), Scene::Reward);
    }

    #[test]
    fn test_back_resumes_ambient_after_delay() {
        let mut state = page();
        state.accept();
        state.navigate(Nav::EnterGame);
        state.drain_events();

        assert!(state.back());
        assert!(toasts(&state.drain_events()).contains(&"You collected 0 hearts 💖".to_string()));
        assert!(!state.game(GameKind::Ambient).is_running());
        state.advance(AMBIENT_RESUME_DELAY_MS - 1);
        assert!(!state.game(GameKind::Ambient).is_running());
        state.advance(1);
        assert!(state.game(GameKind::Ambient).is_running());
    }

    #[test]
    fn test_resume_starts_at_its_deadline() {
        let mut state = page();
        state.accept();
        state.navigate(Nav::EnterGame);
        state.back();

        // One long frame crosses the resume deadline
        state.advance(400);
        state.advance(250);
        let ambient = state.game(GameKind::Ambient);
        assert_eq!(ambient.started_at(), Some(AMBIENT_RESUME_DELAY_MS));
        assert!(ambient.entities().is_empty());

        // First spawn lands one interval after the resume, not after the frame
        let first_spawn = AMBIENT_RESUME_DELAY_MS + Tuning::default().ambient.spawn_interval_ms;
        state.advance(first_spawn - state.now_ms());
        let spawned: Vec<u64> = state
            .game(GameKind::Ambient)
            .entities()
            .iter()
            .map(|e| e.spawned_at)
            .collect();
        assert_eq!(spawned, vec![first_spawn]);
    }

    #[test]
    fn test_oversized_settings_keep_game_running() {
        let settings = Settings::from_json(
            r#"{"tuning":{"hearts":{"session_duration_ms":18446744073709551615,"spawn_interval_ms":18446744073709551615}}}"#,
        )
        .unwrap();
        let mut state = PageState::new(7, &settings);
        state.accept();
        state.navigate(Nav::EnterGame);
        run_for(&mut state, 5_000);

        assert_eq!(state.scene(), Scene::CatchGame);
        assert!(state.game(GameKind::Hearts).is_running());
        assert!(state.game(GameKind::Hearts).entities().is_empty());
        assert!(state.back());
        state.advance(AMBIENT_RESUME_DELAY_MS);
        assert!(state.game(GameKind::Ambient).is_running());
    }

    #[test]
    fn test_round_trip_leaves_no_timers() {
        let mut state = page();
        state.accept();
        run_for(&mut state, 600);
        let id = first_live(&state, GameKind::Ambient).unwrap();
        state.catch(GameKind::Ambient, id);
        assert_eq!(state.scene(), Scene::CatchGame);
        run_for(&mut state, 2000);

        state.back();
        state.back();
        assert_eq!(state.scene(), Scene::Proposal);
        assert!(!state.game(GameKind::Hearts).is_running());
        assert!(!state.game(GameKind::Ambient).is_running());
        assert_eq!(state.pending_timers(), 0);

        // The cancelled resume never fires
        run_for(&mut state, 5000);
        assert!(!state.game(GameKind::Ambient).is_running());
    }

    #[test]
    fn test_round_trip_after_resume() {
        let mut state = page();
        state.accept();
        state.navigate(Nav::EnterGame);
        state.back();
        run_for(&mut state, 1500);
        assert!(state.game(GameKind::Ambient).is_running());

        state.back();
        assert_eq!(state.scene(), Scene::Proposal);
        assert_eq!(state.pending_timers(), 0);
    }

    #[test]
    fn test_reset_from_catch_game() {
        let mut state = page();
        assert!(state.navigate(Nav::Reset).is_none());
        state.accept();
        state.navigate(Nav::EnterGame);
        run_for(&mut state, 1000);

        let t = state.navigate(Nav::Reset).unwrap();
        assert_eq!(t.to, Scene::Proposal);
        assert!(!state.back_visible());
        for kind in [GameKind::Ambient, GameKind::Hearts] {
            assert!(!state.game(kind).is_running());
        }
        assert_eq!(state.pending_timers(), 0);
    }

    #[test]
    fn test_award_floor() {
        let mut state = page();
        state.award(20, None);
        assert_eq!(state.award(-50, None), 0);
        let events = state.drain_events();
        assert!(toasts(&events).is_empty());
        assert!(matches!(events.last(), Some(PageEvent::RizzChanged { value: 0 })));
    }

    #[test]
    fn test_dodge_only_on_proposal() {
        let mut state = page();
        state.dodge();
        assert_eq!(state.proposal().dodges, 1);
        state.accept();
        state.dodge();
        assert_eq!(state.proposal().dodges, 1);
    }

    #[test]
    fn test_replay_allowance() {
        let mut state = page();
        assert_eq!(state.replay_remaining(), 1);
        assert!(state.replay());
        assert!(!state.replay());
        let events = state.drain_events();
        assert!(matches!(events.last(), Some(PageEvent::ReplayChanged { remaining: 0 })));
    }

    #[test]
    fn test_paw_particles_fade() {
        let mut state = page();
        state.paw();
        assert_eq!(state.particles().len(), PAW_PARTICLES);
        for p in state.particles() {
            assert!(p.offset.x.abs() <= PAW_SPREAD / 2.0);
            assert!(p.offset.y <= 0.0 && p.offset.y >= -PAW_SPREAD);
        }
        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(e, PageEvent::Clip(Clip::Paw(_)))));

        state.advance(PAW_PARTICLE_LIFE_MS);
        assert!(state.particles().is_empty());
        assert_eq!(state.pending_timers(), 0);
    }

    #[test]
    fn test_teardown_cancels_everything() {
        let mut state = page();
        state.accept();
        state.open_secret();
        state.paw();
        run_for(&mut state, 1000);
        assert!(state.pending_timers() > 0);

        state.teardown();
        assert_eq!(state.pending_timers(), 0);
        for kind in GameKind::ALL {
            assert!(!state.game(kind).is_running());
        }
        state.advance(10_000);
        assert!(state.drain_events().is_empty());
    }
}
