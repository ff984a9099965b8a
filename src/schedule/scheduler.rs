//! Scheduler: ring rotation over registered apps with animated handoffs.

use super::RegistryError;
use crate::app::{App, Job};
use crate::jobs::JobRunner;
use crate::surface::Surface;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for the scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Display duration for apps registered without one.
    pub default_duration: Duration,
    /// How long a transition between two apps takes.
    pub transition_window: Duration,
    /// How many pixel rows the wipe travels over the full window.
    ///
    /// One glyph row on the classic 64x32 matrix is 8 pixel rows; the
    /// incoming app slides in from exactly one row pitch below.
    pub row_pitch: i32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            default_duration: Duration::from_secs(10),
            transition_window: Duration::from_secs(1),
            row_pitch: 8,
        }
    }
}

/// A registered app with its rotation metadata.
struct AppEntry {
    name: String,
    app: Box<dyn App>,
    /// Name of the bound job, if any. The app never owns the job.
    job: Option<String>,
    duration_ms: u64,
}

/// Owns the app rotation and the background job runner.
///
/// The host driver calls [`update`](Self::update) then
/// [`draw`](Self::draw) at its frame rate; the scheduler decides which
/// app is visible, feeds it the latest cached job data, and animates a
/// vertical wipe when the active app's display duration runs out.
///
/// Rotation is a fixed ring over registration order. Exactly one app is
/// active at all times once one is registered, and at most one
/// transition is in progress; its target is always the next app in ring
/// order.
pub struct Scheduler {
    config: SchedulerConfig,
    jobs: JobRunner,
    apps: Vec<AppEntry>,
    /// Index of the currently visible app.
    active: usize,
    /// Index of the incoming app during a transition.
    next: Option<usize>,
    /// When the current view (steady or transition) started; latched on
    /// the first `update` call.
    view_start: Option<u64>,
    /// Current vertical pan, non-zero only mid-transition.
    y_offset: i32,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Create a scheduler with default configuration.
    pub fn new() -> Self {
        Self::with_config(SchedulerConfig::default())
    }

    /// Create a scheduler with custom configuration.
    pub fn with_config(config: SchedulerConfig) -> Self {
        Self {
            config,
            jobs: JobRunner::new(),
            apps: Vec::new(),
            active: 0,
            next: None,
            view_start: None,
            y_offset: 0,
        }
    }

    /// Register a background job under a unique name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateJob`] if the name is taken.
    pub fn register_job(
        &mut self,
        name: &str,
        job: Arc<dyn Job>,
        interval: Duration,
    ) -> Result<(), RegistryError> {
        self.jobs.register(name, job, interval)
    }

    /// Register an app at the end of the rotation ring.
    ///
    /// `job` optionally names a registered job whose cached result is
    /// passed to the app on every update. `duration` is how long the app
    /// stays visible per turn; defaults to the configured
    /// `default_duration`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateApp`] if the name is taken.
    pub fn register_app(
        &mut self,
        name: &str,
        app: Box<dyn App>,
        job: Option<&str>,
        duration: Option<Duration>,
    ) -> Result<(), RegistryError> {
        if self.apps.iter().any(|entry| entry.name == name) {
            return Err(RegistryError::DuplicateApp(name.to_string()));
        }
        let duration = duration.unwrap_or(self.config.default_duration);
        self.apps.push(AppEntry {
            name: name.to_string(),
            app,
            job: job.map(str::to_string),
            duration_ms: duration_ms(duration),
        });
        Ok(())
    }

    /// Start the background job workers.
    pub fn start_jobs(&mut self) {
        self.jobs.start_all();
    }

    /// Stop the background job workers. Non-blocking; see
    /// [`JobRunner::stop_all`].
    pub fn stop_jobs(&mut self) {
        self.jobs.stop_all();
    }

    /// The job runner, for hosts that read cached results directly.
    pub const fn jobs(&self) -> &JobRunner {
        &self.jobs
    }

    /// Name of the currently active app.
    pub fn active_app(&self) -> Option<&str> {
        self.apps.get(self.active).map(|entry| entry.name.as_str())
    }

    /// Whether a transition is in progress.
    pub const fn is_transitioning(&self) -> bool {
        self.next.is_some()
    }

    /// Current vertical pan offset; `0` outside transitions.
    pub const fn y_offset(&self) -> i32 {
        self.y_offset
    }

    /// Advance the rotation to `now_ms` and update the visible app(s).
    ///
    /// During a transition both the outgoing and incoming apps are
    /// updated; the pan offset grows monotonically with elapsed
    /// transition time until the window ends and the handoff commits.
    pub fn update(&mut self, now_ms: u64) {
        if self.apps.is_empty() {
            return;
        }
        let view_start = *self.view_start.get_or_insert(now_ms);
        let window_ms = duration_ms(self.config.transition_window).max(1);

        if let Some(next) = self.next {
            self.update_app(now_ms, next);

            let elapsed = now_ms.saturating_sub(view_start);
            self.y_offset = offset_for(elapsed, self.config.row_pitch, window_ms);

            if elapsed >= window_ms {
                self.view_start = Some(now_ms);
                self.active = next;
                self.next = None;
                self.y_offset = 0;
            }
        }

        self.update_app(now_ms, self.active);

        // view_start may have just been reset by a commit above.
        let view_start = self.view_start.unwrap_or(now_ms);
        let elapsed = now_ms.saturating_sub(view_start);
        if self.next.is_none() && elapsed >= self.apps[self.active].duration_ms {
            self.next = Some((self.active + 1) % self.apps.len());
            self.view_start = Some(now_ms);
        }
    }

    /// Render the visible app(s) into the surface.
    ///
    /// Sets the pan to the current offset and draws the active app;
    /// during a transition the incoming app is drawn one row pitch
    /// behind, producing the sliding wipe.
    pub fn draw(&self, surface: &mut Surface) {
        let Some(entry) = self.apps.get(self.active) else {
            return;
        };
        surface.set_pan(0, self.y_offset);
        entry.app.draw(surface);

        if let Some(next) = self.next {
            if let Some(entry) = self.apps.get(next) {
                surface.set_pan(0, self.y_offset - self.config.row_pitch);
                entry.app.draw(surface);
            }
        }
    }

    /// Feed one app the latest cached data for its bound job and tick it.
    fn update_app(&mut self, now_ms: u64, index: usize) {
        let data = {
            let entry = &self.apps[index];
            match entry.job.as_deref() {
                Some(job_name) if self.jobs.is_registered(job_name) => {
                    self.jobs.result_of(job_name)
                }
                Some(job_name) => {
                    // Configuration error: keep rendering with no data.
                    log::error!(
                        "app '{}' references unregistered job '{job_name}'",
                        entry.name
                    );
                    None
                }
                None => None,
            }
        };
        self.apps[index].app.update(now_ms, data);
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("apps", &self.apps.len())
            .field("active", &self.active)
            .field("next", &self.next)
            .field("y_offset", &self.y_offset)
            .finish()
    }
}

/// Whole milliseconds of a duration, saturating.
fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Pan offset for a transition `elapsed` ms into a `window_ms` window.
fn offset_for(elapsed: u64, row_pitch: i32, window_ms: u64) -> i32 {
    let travelled = elapsed.saturating_mul(row_pitch.unsigned_abs().into()) / window_ms;
    let travelled = i32::try_from(travelled).unwrap_or(i32::MAX);
    if row_pitch < 0 {
        -travelled
    } else {
        travelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{JobError, JobValue};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records every update timestamp and every pan seen at draw time.
    #[derive(Default)]
    struct ProbeState {
        updates: Vec<(u64, bool)>,
        draw_pans: Vec<(i32, i32)>,
    }

    struct ProbeApp {
        state: Arc<Mutex<ProbeState>>,
    }

    impl ProbeApp {
        fn new() -> (Box<Self>, Arc<Mutex<ProbeState>>) {
            let state = Arc::new(Mutex::new(ProbeState::default()));
            (
                Box::new(Self {
                    state: Arc::clone(&state),
                }),
                state,
            )
        }
    }

    impl App for ProbeApp {
        fn update(&mut self, now_ms: u64, data: Option<JobValue>) {
            self.state
                .lock()
                .unwrap()
                .updates
                .push((now_ms, data.is_some()));
        }

        fn draw(&self, surface: &mut Surface) {
            self.state.lock().unwrap().draw_pans.push(surface.pan());
            surface.set(0, 0, 0xFF);
        }
    }

    struct InstantJob {
        runs: Arc<AtomicUsize>,
    }

    impl Job for InstantJob {
        fn run(&self) -> Result<JobValue, JobError> {
            let n = self.runs.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(Arc::new(n))
        }
    }

    fn two_app_scheduler() -> (Scheduler, Arc<Mutex<ProbeState>>, Arc<Mutex<ProbeState>>) {
        let mut scheduler = Scheduler::new();
        let (app_a, state_a) = ProbeApp::new();
        let (app_b, state_b) = ProbeApp::new();
        scheduler
            .register_app("a", app_a, None, Some(Duration::from_millis(10_000)))
            .unwrap();
        scheduler
            .register_app("b", app_b, None, Some(Duration::from_millis(5_000)))
            .unwrap();
        (scheduler, state_a, state_b)
    }

    #[test]
    fn test_rotation_timeline() {
        let (mut scheduler, state_a, state_b) = two_app_scheduler();

        scheduler.update(0);
        assert_eq!(scheduler.active_app(), Some("a"));
        assert!(!scheduler.is_transitioning());

        scheduler.update(9_999);
        assert!(!scheduler.is_transitioning());

        // Duration elapsed: the transition to b begins, pan still 0.
        scheduler.update(10_000);
        assert!(scheduler.is_transitioning());
        assert_eq!(scheduler.active_app(), Some("a"));
        assert_eq!(scheduler.y_offset(), 0);

        // Mid-transition: both apps tick, pan has advanced.
        scheduler.update(10_500);
        assert_eq!(scheduler.y_offset(), 4);
        assert!(state_a.lock().unwrap().updates.iter().any(|u| u.0 == 10_500));
        assert!(state_b.lock().unwrap().updates.iter().any(|u| u.0 == 10_500));

        // Window elapsed: b commits, pan resets.
        scheduler.update(11_000);
        assert!(!scheduler.is_transitioning());
        assert_eq!(scheduler.active_app(), Some("b"));
        assert_eq!(scheduler.y_offset(), 0);

        // b's own 5 s duration counts from the commit.
        scheduler.update(15_999);
        assert!(!scheduler.is_transitioning());
        scheduler.update(16_000);
        assert!(scheduler.is_transitioning());
        assert_eq!(scheduler.active_app(), Some("b"));
    }

    #[test]
    fn test_pan_is_monotonic_during_transition() {
        let (mut scheduler, _, _) = two_app_scheduler();

        scheduler.update(0);
        scheduler.update(10_000);

        let mut last = 0;
        for t in (10_000..11_000).step_by(100) {
            scheduler.update(t);
            let offset = scheduler.y_offset();
            assert!(offset >= last, "pan went backwards at t={t}");
            assert!(offset <= 8);
            last = offset;
        }

        scheduler.update(11_000);
        assert_eq!(scheduler.y_offset(), 0);
    }

    #[test]
    fn test_draw_pans_during_transition() {
        let (mut scheduler, state_a, state_b) = two_app_scheduler();
        let mut surface = Surface::new(64, 32);

        // Steady state: active draws at pan 0, the other app not at all.
        scheduler.update(0);
        scheduler.draw(&mut surface);
        assert_eq!(state_a.lock().unwrap().draw_pans, vec![(0, 0)]);
        assert!(state_b.lock().unwrap().draw_pans.is_empty());

        // Mid-transition: outgoing at the offset, incoming one row
        // pitch behind.
        scheduler.update(10_000);
        scheduler.update(10_500);
        scheduler.draw(&mut surface);
        assert_eq!(*state_a.lock().unwrap().draw_pans.last().unwrap(), (0, 4));
        assert_eq!(*state_b.lock().unwrap().draw_pans.last().unwrap(), (0, -4));
    }

    #[test]
    fn test_ring_order_over_full_cycle() {
        let mut scheduler = Scheduler::new();
        for name in ["a", "b", "c"] {
            let (app, _) = ProbeApp::new();
            scheduler
                .register_app(name, app, None, Some(Duration::from_millis(2_000)))
                .unwrap();
        }

        let mut seen = vec![scheduler.active_app().map(str::to_string)];
        for t in (0..=10_000).step_by(100) {
            scheduler.update(t);
            let current = scheduler.active_app().map(str::to_string);
            if seen.last() != Some(&current) {
                seen.push(current);
            }
        }

        let order: Vec<_> = seen.into_iter().flatten().collect();
        assert_eq!(order, ["a", "b", "c", "a"]);
    }

    #[test]
    fn test_single_app_rotates_to_itself() {
        let mut scheduler = Scheduler::new();
        let (app, state) = ProbeApp::new();
        scheduler
            .register_app("only", app, None, Some(Duration::from_millis(1_000)))
            .unwrap();

        scheduler.update(0);
        scheduler.update(1_000);
        assert!(scheduler.is_transitioning());
        assert_eq!(scheduler.active_app(), Some("only"));

        scheduler.update(2_000);
        assert!(!scheduler.is_transitioning());
        assert_eq!(scheduler.active_app(), Some("only"));
        assert!(!state.lock().unwrap().updates.is_empty());
    }

    #[test]
    fn test_short_duration_does_not_restart_transition() {
        let mut scheduler = Scheduler::new();
        for name in ["a", "b"] {
            let (app, _) = ProbeApp::new();
            // Shorter than the 1 s transition window.
            scheduler
                .register_app(name, app, None, Some(Duration::from_millis(200)))
                .unwrap();
        }

        scheduler.update(0);
        scheduler.update(200);
        assert!(scheduler.is_transitioning());

        // The in-flight transition must run to completion even though
        // the active app's duration keeps elapsing underneath it.
        scheduler.update(700);
        assert!(scheduler.is_transitioning());
        scheduler.update(1_200);
        assert!(!scheduler.is_transitioning());
        assert_eq!(scheduler.active_app(), Some("b"));
    }

    #[test]
    fn test_unregistered_job_is_treated_as_no_data() {
        let mut scheduler = Scheduler::new();
        let (app, state) = ProbeApp::new();
        scheduler
            .register_app("weather", app, Some("missing-job"), None)
            .unwrap();

        scheduler.update(0);
        scheduler.update(100);

        let updates = &state.lock().unwrap().updates;
        assert_eq!(updates.len(), 2);
        assert!(updates.iter().all(|&(_, had_data)| !had_data));
    }

    #[test]
    fn test_job_data_reaches_bound_app() {
        let runs = Arc::new(AtomicUsize::new(0));
        let mut scheduler = Scheduler::new();
        scheduler
            .register_job(
                "counter",
                Arc::new(InstantJob {
                    runs: Arc::clone(&runs),
                }),
                Duration::from_millis(10),
            )
            .unwrap();
        let (app, state) = ProbeApp::new();
        scheduler
            .register_app("display", app, Some("counter"), None)
            .unwrap();

        // No data before the first run completes.
        scheduler.update(0);
        assert_eq!(state.lock().unwrap().updates.last(), Some(&(0, false)));

        scheduler.start_jobs();
        std::thread::sleep(Duration::from_millis(50));
        scheduler.update(100);
        scheduler.stop_jobs();

        assert_eq!(state.lock().unwrap().updates.last(), Some(&(100, true)));
    }

    #[test]
    fn test_empty_scheduler_is_inert() {
        let mut scheduler = Scheduler::new();
        let mut surface = Surface::new(8, 8);

        scheduler.update(0);
        scheduler.draw(&mut surface);

        assert_eq!(scheduler.active_app(), None);
        assert!(!scheduler.is_transitioning());
        assert!(surface.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_duplicate_app_rejected() {
        let mut scheduler = Scheduler::new();
        let (first, _) = ProbeApp::new();
        let (second, _) = ProbeApp::new();

        scheduler.register_app("clock", first, None, None).unwrap();
        let err = scheduler.register_app("clock", second, None, None).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateApp("clock".to_string()));
    }

    #[test]
    fn test_default_duration_applies() {
        let mut scheduler = Scheduler::new();
        for name in ["a", "b"] {
            let (app, _) = ProbeApp::new();
            scheduler.register_app(name, app, None, None).unwrap();
        }

        scheduler.update(0);
        scheduler.update(9_999);
        assert!(!scheduler.is_transitioning());
        scheduler.update(10_000);
        assert!(scheduler.is_transitioning());
    }
}
