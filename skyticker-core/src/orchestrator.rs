//! Cooperative tick loop
//!
//! The [`Orchestrator`] is the single owner of all mutable display state:
//! the current snapshot, the message channel, the scroll animator, the
//! refresh and retry bookkeeping and the backlight level. It also owns the
//! collaborators it drives. One call to [`Orchestrator::tick`] runs to
//! completion before the next; the only await that can take long is a
//! single fetch attempt (bounded by the data source's timeout) or a clock
//! resync.
//!
//! Per tick:
//! 1. poll buttons and apply brightness changes
//! 2. advance the ticker; on wrap, commit any pending message
//! 3. run a fetch attempt if a cycle is due or a retry deadline passed
//! 4. render the committed message and current snapshot

use crate::brightness::Brightness;
use crate::channel::MessageChannel;
use crate::config::{DeviceConfig, WeatherQuery};
use crate::scheduler::{RefreshTimer, RetryDecision, RetryPolicy, RetryState};
use crate::state::{FetchEvent, FetchState};
use crate::ticker::{Advance, TickerAnimator};
use crate::time::{ClockTime, TimeZone};
use crate::traits::{
    Backlight, ClockSource, DataSource, FetchError, Frame, InputSource, Renderer,
};
use crate::weather::{MessageLine, Snapshot, INITIAL_MESSAGE, PLACEHOLDER_MESSAGE};

/// Application context driven once per tick
pub struct Orchestrator<D, C, R, I, B> {
    source: D,
    clock: C,
    renderer: R,
    input: I,
    backlight: B,

    query: WeatherQuery,
    zone: TimeZone,
    resync_attempts: u8,

    snapshot: Option<Snapshot>,
    channel: MessageChannel,
    animator: TickerAnimator,
    timer: RefreshTimer,
    retry: RetryState,
    fetch: FetchState,
    brightness: Brightness,
    connected: bool,
    frames: u32,
}

impl<D, C, R, I, B> Orchestrator<D, C, R, I, B>
where
    D: DataSource,
    C: ClockSource,
    R: Renderer,
    I: InputSource,
    B: Backlight,
{
    /// Build the context from a validated configuration
    pub fn new(
        config: &DeviceConfig,
        source: D,
        clock: C,
        renderer: R,
        input: I,
        backlight: B,
    ) -> Self {
        Self {
            source,
            clock,
            renderer,
            input,
            backlight,
            query: config.weather.clone(),
            zone: config.time,
            resync_attempts: config.refresh.resync_attempts.max(1),
            snapshot: None,
            channel: MessageChannel::new(INITIAL_MESSAGE, config.ticker.capacity as usize),
            animator: TickerAnimator::from_config(&config.ticker),
            timer: RefreshTimer::from_config(&config.refresh),
            retry: RetryState::new(RetryPolicy::from_config(&config.refresh)),
            fetch: FetchState::Idle,
            brightness: Brightness::new(&config.display),
            connected: false,
            frames: 0,
        }
    }

    /// Boot sequence: apply the backlight level and sync the clock
    ///
    /// A failed sync is not fatal; the display shows fallback times until
    /// the next scheduled resync succeeds.
    pub async fn start(&mut self) {
        self.backlight.set_brightness(self.brightness.level());
        info!("Backlight at {}", self.brightness.level());
        self.resync_clock().await;
    }

    /// Run one cooperative tick at monotonic time `now_ms`
    pub async fn tick(&mut self, now_ms: u64) {
        self.poll_input();

        if self.animator.advance() == Advance::Wrapped && self.channel.commit() {
            self.animator.mark_extent_dirty();
            info!("Scrolling message updated at animation restart");
        }

        self.drive_fetch(now_ms).await;
        self.render();
    }

    fn poll_input(&mut self) {
        let buttons = self.input.poll_buttons();
        if let Some(level) = self.brightness.apply(buttons) {
            self.backlight.set_brightness(level);
            info!("Brightness set to {}", level);
        }
    }

    async fn drive_fetch(&mut self, now_ms: u64) {
        match self.fetch {
            FetchState::Idle => {
                if !self.timer.due(now_ms) {
                    return;
                }
                // Decided before the attempt so the outcome cannot affect it
                let resync = self.timer.resync_due();

                self.begin_cycle(now_ms);
                self.attempt(now_ms).await;

                if resync {
                    self.resync_clock().await;
                    self.timer.reset_successes();
                }
            }
            FetchState::RetryWait { .. } => {
                if self.fetch.backoff_elapsed(now_ms) {
                    self.fetch = self.fetch.transition(FetchEvent::BackoffElapsed);
                    self.attempt(now_ms).await;
                }
            }
            FetchState::Fetching => self.attempt(now_ms).await,
        }
    }

    fn begin_cycle(&mut self, now_ms: u64) {
        info!("Fetch cycle starting at {} ms", now_ms);
        self.timer.mark_started(now_ms);
        self.retry.reset();
        self.channel.publish(PLACEHOLDER_MESSAGE);
        self.fetch = self.fetch.transition(FetchEvent::CycleDue);
    }

    async fn attempt(&mut self, now_ms: u64) {
        let n = self.retry.begin_attempt();
        debug!("Fetch attempt {}/{}", n, self.retry.max_attempts());

        let started = self.clock.uptime_ms();
        let result = self.source.fetch(&self.query).await;
        // Backoff counts from when the attempt returned, not from the tick
        let returned_ms = now_ms + self.clock.uptime_ms().saturating_sub(started);

        match result {
            Ok(snapshot) => self.accept(snapshot),
            Err(e) => self.reject(e, returned_ms),
        }
    }

    fn accept(&mut self, snapshot: Snapshot) {
        let stamp = self.local_time().unwrap_or(ClockTime::FALLBACK);
        let snapshot = snapshot.stamped(stamp);

        self.channel
            .publish_fmt(format_args!("{}", MessageLine::new(&snapshot, self.query.units)));
        self.snapshot = Some(snapshot);

        self.retry.reset();
        self.timer.record_success();
        self.connected = true;
        self.fetch = self.fetch.transition(FetchEvent::AttemptSucceeded);
        info!(
            "Weather updated ({} successful cycles since resync)",
            self.timer.success_count()
        );
    }

    fn reject(&mut self, error: FetchError, returned_ms: u64) {
        self.connected = false;
        warn!(
            "Fetch attempt {}/{} failed: {}",
            self.retry.attempt(),
            self.retry.max_attempts(),
            error
        );

        let event = match self.retry.decide() {
            RetryDecision::Abandon => {
                warn!("Fetch cycle abandoned, keeping previous snapshot");
                self.retry.reset();
                FetchEvent::RetriesExhausted
            }
            RetryDecision::Backoff { delay_ms } => FetchEvent::AttemptFailed {
                retry_at_ms: returned_ms + delay_ms,
            },
        };
        self.fetch = self.fetch.transition(event);
    }

    /// Bounded resync; returns whether any attempt succeeded
    async fn resync_clock(&mut self) -> bool {
        for attempt in 1..=self.resync_attempts {
            match self.clock.resync().await {
                Ok(()) => {
                    info!("Clock synchronized on attempt {}", attempt);
                    return true;
                }
                Err(e) => debug!("Clock sync attempt {} failed: {}", attempt, e),
            }
        }
        warn!(
            "Clock sync failed after {} attempts, keeping previous time",
            self.resync_attempts
        );
        false
    }

    fn render(&mut self) {
        if self.animator.extent_dirty() {
            let extent = self.renderer.measure(self.channel.active());
            self.animator.set_extent(extent);
        }

        let clock = self.local_time();
        let frame = Frame {
            snapshot: self.snapshot.as_ref(),
            message: self.channel.active(),
            offset: self.animator.offset(),
            extent: self.animator.extent(),
            spacing: self.animator.spacing(),
            clock,
            update_count: self.timer.success_count(),
            connected: self.connected,
            location: &self.query.location,
            units: self.query.units,
        };

        match self.renderer.render(&frame) {
            Ok(()) => self.frames = self.frames.wrapping_add(1),
            Err(e) => warn!("Render failed: {}", e),
        }
    }

    fn local_time(&self) -> Option<ClockTime> {
        self.clock.now().map(|t| self.zone.local_time(t))
    }

    /// Latest accepted snapshot
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn channel(&self) -> &MessageChannel {
        &self.channel
    }

    pub fn animator(&self) -> &TickerAnimator {
        &self.animator
    }

    pub fn timer(&self) -> &RefreshTimer {
        &self.timer
    }

    pub fn retry(&self) -> &RetryState {
        &self.retry
    }

    pub fn fetch_state(&self) -> FetchState {
        self.fetch
    }

    pub fn brightness(&self) -> u8 {
        self.brightness.level()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Frames drawn without a renderer error, wrapping
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn source(&self) -> &D {
        &self.source
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn backlight(&self) -> &B {
        &self.backlight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::UnixTime;
    use crate::traits::{Buttons, RenderError, SyncError};
    use crate::weather::{Readings, ValidationError};
    use embassy_futures::block_on;
    use std::cell::Cell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::string::String;
    use std::vec::Vec;

    const TICK_MS: u64 = 25;

    // 2024-01-15 19:03:07 UTC = 14:03:07 EST
    const NOW: UnixTime = UnixTime(1_705_345_387);

    fn clear_sky() -> Snapshot {
        let readings = Readings {
            wind_speed: 3.0,
            visibility_m: 10_000.0,
            ..Default::default()
        };
        Snapshot::new(21.5, "clear sky", readings).unwrap()
    }

    #[derive(Default)]
    struct MockSource {
        script: VecDeque<Result<Snapshot, FetchError>>,
        fallback: Option<Result<Snapshot, FetchError>>,
        calls: u32,
        /// Uptime each attempt consumes, shared with the clock
        latency_ms: u64,
        uptime: Rc<Cell<u64>>,
    }

    impl MockSource {
        fn always(result: Result<Snapshot, FetchError>) -> Self {
            Self {
                fallback: Some(result),
                ..Default::default()
            }
        }
    }

    impl DataSource for MockSource {
        async fn fetch(&mut self, _query: &WeatherQuery) -> Result<Snapshot, FetchError> {
            self.calls += 1;
            self.uptime.set(self.uptime.get() + self.latency_ms);
            self.script
                .pop_front()
                .or_else(|| self.fallback.clone())
                .unwrap_or(Err(FetchError::Network))
        }
    }

    struct MockClock {
        now: Option<UnixTime>,
        ok: bool,
        resyncs: u32,
        uptime: Rc<Cell<u64>>,
    }

    impl MockClock {
        fn synced() -> Self {
            Self {
                now: Some(NOW),
                ok: true,
                resyncs: 0,
                uptime: Rc::default(),
            }
        }
    }

    impl ClockSource for MockClock {
        async fn resync(&mut self) -> Result<(), SyncError> {
            self.resyncs += 1;
            if self.ok {
                Ok(())
            } else {
                Err(SyncError::Timeout)
            }
        }

        fn now(&self) -> Option<UnixTime> {
            self.now
        }

        fn uptime_ms(&self) -> u64 {
            self.uptime.get()
        }
    }

    #[derive(Default)]
    struct MockRenderer {
        frames: u32,
        measures: u32,
        last_message: String,
        last_offset: i32,
        fail: bool,
    }

    impl Renderer for MockRenderer {
        fn measure(&mut self, text: &str) -> u32 {
            self.measures += 1;
            text.chars().count() as u32 * 8
        }

        fn render(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
            self.frames += 1;
            self.last_message = String::from(frame.message);
            self.last_offset = frame.offset;
            if self.fail {
                Err(RenderError::Bus)
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct MockInput {
        presses: VecDeque<Buttons>,
    }

    impl InputSource for MockInput {
        fn poll_buttons(&mut self) -> Buttons {
            self.presses.pop_front().unwrap_or_default()
        }
    }

    #[derive(Default)]
    struct MockBacklight {
        levels: Vec<u8>,
    }

    impl Backlight for MockBacklight {
        fn set_brightness(&mut self, level: u8) {
            self.levels.push(level);
        }
    }

    type TestOrchestrator =
        Orchestrator<MockSource, MockClock, MockRenderer, MockInput, MockBacklight>;

    fn orchestrator(source: MockSource) -> TestOrchestrator {
        orchestrator_with(DeviceConfig::default(), source, MockInput::default())
    }

    fn orchestrator_with(
        config: DeviceConfig,
        source: MockSource,
        input: MockInput,
    ) -> TestOrchestrator {
        Orchestrator::new(
            &config,
            source,
            MockClock::synced(),
            MockRenderer::default(),
            input,
            MockBacklight::default(),
        )
    }

    /// Tick from `from_ms` (inclusive) to `to_ms` (exclusive); returns next time
    fn run(o: &mut TestOrchestrator, from_ms: u64, to_ms: u64) -> u64 {
        let mut now = from_ms;
        while now < to_ms {
            block_on(o.tick(now));
            now += TICK_MS;
        }
        now
    }

    /// Source whose every attempt takes `latency_ms` of uptime
    fn slow_orchestrator(
        config: DeviceConfig,
        result: Result<Snapshot, FetchError>,
        latency_ms: u64,
    ) -> TestOrchestrator {
        let mut source = MockSource::always(result);
        source.latency_ms = latency_ms;
        let mut o = orchestrator_with(config, source, MockInput::default());
        o.clock.uptime = Rc::clone(&o.source.uptime);
        o
    }

    /// Tick on uptime until `to_ms`, the way the firmware loop does:
    /// one tick period after each tick returns, however long it took.
    /// Returns the times at which cycles started.
    fn run_on_uptime(o: &mut TestOrchestrator, to_ms: u64) -> Vec<u64> {
        let uptime = Rc::clone(&o.clock.uptime);
        let mut starts = Vec::new();
        while uptime.get() < to_ms {
            let now = uptime.get();
            let before = o.timer().last_fetch_ms();
            block_on(o.tick(now));
            if o.timer().last_fetch_ms() != before {
                starts.push(now);
            }
            uptime.set(uptime.get() + TICK_MS);
        }
        starts
    }

    #[test]
    fn test_start_sets_backlight_and_syncs() {
        let mut o = orchestrator(MockSource::always(Ok(clear_sky())));
        block_on(o.start());
        assert_eq!(o.backlight().levels, [215]);
        assert_eq!(o.clock().resyncs, 1);
    }

    #[test]
    fn test_start_resync_bounded() {
        let mut config = DeviceConfig::default();
        config.refresh.resync_attempts = 4;
        let mut o = orchestrator_with(config, MockSource::default(), MockInput::default());
        o.clock.ok = false;
        block_on(o.start());
        assert_eq!(o.clock().resyncs, 4);
    }

    #[test]
    fn test_first_tick_fetches_immediately() {
        let mut o = orchestrator(MockSource::always(Ok(clear_sky())));
        block_on(o.tick(0));
        assert_eq!(o.source().calls, 1);
        assert!(o.snapshot().is_some());
        assert_eq!(o.timer().success_count(), 1);
        assert_eq!(o.fetch_state(), FetchState::Idle);
        assert!(o.is_connected());
    }

    #[test]
    fn test_one_fetch_per_interval() {
        let mut o = orchestrator(MockSource::always(Ok(clear_sky())));
        // Ticks over [0, 3 intervals) plus one tick
        run(&mut o, 0, 3 * 180_000 + TICK_MS);
        assert_eq!(o.source().calls, 4);
        assert_eq!(o.timer().last_fetch_ms(), Some(540_000));
    }

    #[test]
    fn test_one_fetch_per_interval_when_always_failing() {
        let mut o = orchestrator(MockSource::always(Err(FetchError::Network)));
        run(&mut o, 0, 3 * 180_000 + TICK_MS);
        // Three attempts in each full cycle, the first of the fourth
        assert_eq!(o.source().calls, 3 * 3 + 1);
        assert_eq!(o.timer().last_fetch_ms(), Some(540_000));
    }

    #[test]
    fn test_slow_failures_start_every_cycle_on_time() {
        // Every attempt runs into the full fetch timeout
        let config = DeviceConfig::default();
        let latency = config.refresh.fetch_timeout_ms as u64;
        let mut o = slow_orchestrator(config, Err(FetchError::Timeout), latency);

        let starts = run_on_uptime(&mut o, 5 * 180_000 + TICK_MS);
        assert_eq!(starts, [0, 180_000, 360_000, 540_000, 720_000, 900_000]);
        assert_eq!(o.source().calls, 5 * 3 + 1);
    }

    #[test]
    fn test_backoff_counts_from_failed_attempt_return() {
        let mut o = slow_orchestrator(DeviceConfig::default(), Err(FetchError::Timeout), 10_000);

        block_on(o.tick(0));
        assert_eq!(o.source().calls, 1);
        assert_eq!(o.fetch_state(), FetchState::RetryWait { deadline_ms: 15_000 });

        // Just after the failed attempt returned: still backing off
        let starts = run_on_uptime(&mut o, 15_000);
        assert!(starts.is_empty());
        assert_eq!(o.source().calls, 1);

        block_on(o.tick(15_000));
        assert_eq!(o.source().calls, 2);
        assert_eq!(o.fetch_state(), FetchState::RetryWait { deadline_ms: 30_000 });
    }

    #[test]
    fn test_committed_message_after_wrap() {
        let mut o = orchestrator(MockSource::always(Ok(clear_sky())));
        block_on(o.tick(0));

        let expected =
            "clear sky, visibility is 10.0 km, wind speed of 10.8 km/h, last updated at 14:03:07...";
        // Published, not yet visible
        assert_eq!(o.channel().active(), INITIAL_MESSAGE);
        assert_eq!(o.channel().pending(), Some(expected));

        let mut now = TICK_MS;
        while o.channel().has_pending() {
            block_on(o.tick(now));
            now += TICK_MS;
        }
        assert_eq!(o.channel().active(), expected);
        assert_eq!(o.animator().offset(), o.animator().start_position());
        assert_eq!(o.renderer().last_message, expected);
    }

    #[test]
    fn test_commit_triggers_single_remeasure() {
        let mut o = orchestrator(MockSource::always(Ok(clear_sky())));
        block_on(o.tick(0));
        assert_eq!(o.renderer().measures, 1);

        // A few ticks without a wrap measure nothing
        run(&mut o, TICK_MS, 10 * TICK_MS);
        assert_eq!(o.renderer().measures, 1);

        let mut now = 10 * TICK_MS;
        while o.channel().has_pending() {
            block_on(o.tick(now));
            now += TICK_MS;
        }
        assert_eq!(o.renderer().measures, 2);
        let message_width = o.channel().active().chars().count() as i32 * 8;
        assert_eq!(o.animator().extent(), message_width);
    }

    #[test]
    fn test_always_failing_source_abandons_after_max_attempts() {
        let mut o = orchestrator(MockSource::always(Err(FetchError::Timeout)));

        block_on(o.tick(0));
        assert_eq!(o.source().calls, 1);
        assert_eq!(o.fetch_state(), FetchState::RetryWait { deadline_ms: 5_000 });

        // Backoff does not block: the ticker keeps moving while waiting
        let offset = o.animator().offset();
        block_on(o.tick(TICK_MS));
        assert_ne!(o.animator().offset(), offset);
        assert_eq!(o.source().calls, 1);

        run(&mut o, 2 * TICK_MS, 179_000);
        assert_eq!(o.source().calls, 3);
        assert_eq!(o.fetch_state(), FetchState::Idle);
        assert_eq!(o.retry().attempt(), 0);
        assert!(o.snapshot().is_none());
        assert!(!o.is_connected());
    }

    #[test]
    fn test_placeholder_stays_after_abandon() {
        let mut o = orchestrator(MockSource::always(Err(FetchError::Network)));
        run(&mut o, 0, 60_000);
        assert_eq!(o.channel().active(), PLACEHOLDER_MESSAGE);
        assert!(!o.channel().has_pending());
    }

    #[test]
    fn test_retry_then_success() {
        let mut source = MockSource::always(Ok(clear_sky()));
        source.script.push_back(Err(FetchError::BadStatus(503)));
        let mut o = orchestrator(source);

        block_on(o.tick(0));
        assert_eq!(o.retry().attempt(), 1);
        assert!(o.snapshot().is_none());

        run(&mut o, TICK_MS, 5_000 + TICK_MS);
        assert_eq!(o.source().calls, 2);
        assert!(o.snapshot().is_some());
        assert_eq!(o.retry().attempt(), 0);
        assert_eq!(o.fetch_state(), FetchState::Idle);
        // Retries do not move the cycle start
        assert_eq!(o.timer().last_fetch_ms(), Some(0));
    }

    #[test]
    fn test_validation_error_keeps_previous_snapshot() {
        let mut source = MockSource::always(Err(FetchError::from(
            ValidationError::MissingTemperature,
        )));
        source.script.push_back(Ok(clear_sky()));
        let mut o = orchestrator(source);

        block_on(o.tick(0));
        let before = o.snapshot().cloned();
        assert!(before.is_some());

        run(&mut o, TICK_MS, 200_000);
        assert!(o.source().calls > 1);
        assert_eq!(o.snapshot().cloned(), before);
    }

    #[test]
    fn test_resync_after_threshold_regardless_of_outcome() {
        let mut source = MockSource::always(Err(FetchError::Network));
        for _ in 0..10 {
            source.script.push_back(Ok(clear_sky()));
        }
        let mut o = orchestrator(source);
        let interval = 180_000;

        // Ten successful cycles
        for cycle in 0..10 {
            block_on(o.tick(cycle * interval));
        }
        assert_eq!(o.timer().success_count(), 10);
        assert_eq!(o.clock().resyncs, 0);

        // The next due tick fails to fetch but still resyncs exactly once
        block_on(o.tick(10 * interval));
        assert_eq!(o.clock().resyncs, 1);
        assert_eq!(o.timer().success_count(), 0);

        // Retries of that cycle do not resync again
        run(&mut o, 10 * interval + TICK_MS, 10 * interval + 20_000);
        assert_eq!(o.clock().resyncs, 1);
    }

    #[test]
    fn test_resync_failure_keeps_time_and_resets_counter() {
        let mut config = DeviceConfig::default();
        config.refresh.resync_every = 2;
        config.refresh.resync_attempts = 3;
        let mut o =
            orchestrator_with(config, MockSource::always(Ok(clear_sky())), MockInput::default());
        o.clock.ok = false;

        block_on(o.tick(0));
        block_on(o.tick(180_000));
        assert_eq!(o.timer().success_count(), 2);

        block_on(o.tick(360_000));
        assert_eq!(o.clock().resyncs, 3);
        assert_eq!(o.timer().success_count(), 0);
        assert_eq!(o.clock().now(), Some(NOW));
    }

    #[test]
    fn test_unsynced_clock_stamps_fallback() {
        let mut o = orchestrator(MockSource::always(Ok(clear_sky())));
        o.clock.now = None;
        block_on(o.tick(0));
        assert_eq!(
            o.snapshot().unwrap().updated_at(),
            Some(ClockTime::FALLBACK)
        );
        assert!(o
            .channel()
            .pending()
            .unwrap()
            .ends_with("last updated at 12:00:00..."));
    }

    #[test]
    fn test_buttons_change_backlight() {
        let mut input = MockInput::default();
        input.presses.push_back(Buttons::BRIGHTNESS_UP);
        input.presses.push_back(Buttons::empty());
        input.presses.push_back(Buttons::BRIGHTNESS_DOWN);
        input.presses.push_back(Buttons::BRIGHTNESS_DOWN);
        let mut o = orchestrator_with(
            DeviceConfig::default(),
            MockSource::always(Ok(clear_sky())),
            input,
        );

        run(&mut o, 0, 4 * TICK_MS);
        assert_eq!(o.backlight().levels, [240, 215, 190]);
        assert_eq!(o.brightness(), 190);
    }

    #[test]
    fn test_render_error_does_not_stop_ticks() {
        let mut o = orchestrator(MockSource::always(Ok(clear_sky())));
        o.renderer.fail = true;
        run(&mut o, 0, 10 * TICK_MS);
        assert_eq!(o.renderer().frames, 10);
        assert_eq!(o.source().calls, 1);
        assert_eq!(o.frames(), 0);
    }

    #[test]
    fn test_frames_counted_per_tick() {
        let mut o = orchestrator(MockSource::always(Ok(clear_sky())));
        run(&mut o, 0, 40 * TICK_MS);
        assert_eq!(o.frames(), 40);
    }

    #[test]
    fn test_renderer_sees_scrolling_offset() {
        let mut o = orchestrator(MockSource::always(Ok(clear_sky())));
        block_on(o.tick(0));
        let first = o.renderer().last_offset;
        block_on(o.tick(TICK_MS));
        assert_eq!(o.renderer().last_offset, first - 2);
    }
}
