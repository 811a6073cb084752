use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use futures::future::{AbortHandle, Abortable};
use gloo::render::{AnimationFrame, request_animation_frame};
use gloo_timers::future::sleep;

use crate::application::session::{DashboardSnapshot, SimulationSession};
use crate::domain::{
    chart::TrackAnimator,
    errors::DomainResult,
    logging::{LogComponent, get_logger},
    market_data::InstrumentId,
};

/// Latest published snapshot. Written by the tick task, read by the frame loop.
pub type SnapshotSlot = Rc<RefCell<Option<DashboardSnapshot>>>;

type TickListener = Rc<dyn Fn(&DashboardSnapshot)>;
type FrameRenderer = Rc<dyn Fn(f64, &TrackAnimator, &DashboardSnapshot)>;

/// Self re-arming `requestAnimationFrame` loop. Dropping it stops the loop.
pub struct FrameLoop {
    pending: Rc<RefCell<Option<AnimationFrame>>>,
    running: Rc<Cell<bool>>,
}

impl FrameLoop {
    pub fn start(draw: impl FnMut(f64) + 'static) -> Self {
        let pending = Rc::new(RefCell::new(None));
        let running = Rc::new(Cell::new(true));
        let draw: Rc<RefCell<dyn FnMut(f64)>> = Rc::new(RefCell::new(draw));
        Self::schedule(Rc::clone(&pending), Rc::clone(&running), draw);
        Self { pending, running }
    }

    fn schedule(
        pending: Rc<RefCell<Option<AnimationFrame>>>,
        running: Rc<Cell<bool>>,
        draw: Rc<RefCell<dyn FnMut(f64)>>,
    ) {
        let slot = Rc::clone(&pending);
        let frame = request_animation_frame(move |timestamp| {
            if !running.get() {
                return;
            }
            (draw.borrow_mut())(timestamp);
            Self::schedule(slot, running, draw);
        });
        *pending.borrow_mut() = Some(frame);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn cancel(&self) {
        self.running.set(false);
        // Dropping the handle cancels the pending frame request.
        self.pending.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Owns the session plus the two periodic tasks driving it: the simulation
/// tick and the animation frame. An instrument switch tears both down before
/// the new series exists, so ticks of two instruments never interleave.
pub struct DashboardCoordinator {
    session: Rc<RefCell<SimulationSession>>,
    latest: SnapshotSlot,
    tick_interval: Duration,
    on_tick: Option<TickListener>,
    on_frame: Option<FrameRenderer>,
    tick_task: Option<AbortHandle>,
    frame_task: Option<FrameLoop>,
}

impl DashboardCoordinator {
    pub fn new(session: SimulationSession) -> Self {
        let tick_interval = session.config().tick_interval();
        Self {
            session: Rc::new(RefCell::new(session)),
            latest: Rc::new(RefCell::new(None)),
            tick_interval,
            on_tick: None,
            on_frame: None,
            tick_task: None,
            frame_task: None,
        }
    }

    /// Called synchronously after every tick and after every switch.
    pub fn with_tick_listener(mut self, listener: impl Fn(&DashboardSnapshot) + 'static) -> Self {
        self.on_tick = Some(Rc::new(listener));
        self
    }

    /// Called once per animation frame with the latest snapshot.
    pub fn with_frame_renderer(
        mut self,
        renderer: impl Fn(f64, &TrackAnimator, &DashboardSnapshot) + 'static,
    ) -> Self {
        self.on_frame = Some(Rc::new(renderer));
        self
    }

    pub fn is_running(&self) -> bool {
        self.tick_task.is_some()
    }

    pub fn latest_snapshot(&self) -> Option<DashboardSnapshot> {
        self.latest.borrow().clone()
    }

    pub fn active_instrument(&self) -> InstrumentId {
        self.session.borrow().instrument().id.clone()
    }

    /// Publish the current state and start both tasks. No-op when already running.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        let snapshot = self.session.borrow().snapshot();
        self.publish(snapshot);
        self.spawn_tick_task();
        self.spawn_frame_loop();

        get_logger().info(
            LogComponent::Application("Coordinator"),
            &format!("Dashboard running ({}ms tick)", self.tick_interval.as_millis()),
        );
    }

    /// Stop issuing ticks and frames. Work already in a callback finishes normally.
    pub fn stop(&mut self) {
        if let Some(handle) = self.tick_task.take() {
            handle.abort();
        }
        if let Some(frame_loop) = self.frame_task.take() {
            frame_loop.cancel();
        }
    }

    pub fn switch_instrument(&mut self, id: &InstrumentId) -> DomainResult<()> {
        let was_running = self.is_running();
        self.stop();
        let snapshot = self.session.borrow_mut().switch_instrument(id);
        let snapshot = match snapshot {
            Ok(snapshot) => snapshot,
            Err(error) => {
                // Unknown id: the old series is still intact, resume it.
                if was_running {
                    self.spawn_tick_task();
                    self.spawn_frame_loop();
                }
                return Err(error);
            }
        };
        self.publish(snapshot);
        if was_running {
            self.spawn_tick_task();
            self.spawn_frame_loop();
        }
        Ok(())
    }

    pub fn select_next(&mut self) -> DomainResult<()> {
        let next = {
            let session = self.session.borrow();
            session.catalog().next(&session.instrument().id)?.id.clone()
        };
        self.switch_instrument(&next)
    }

    pub fn select_previous(&mut self) -> DomainResult<()> {
        let previous = {
            let session = self.session.borrow();
            session.catalog().previous(&session.instrument().id)?.id.clone()
        };
        self.switch_instrument(&previous)
    }

    fn publish(&self, snapshot: DashboardSnapshot) {
        if let Some(listener) = &self.on_tick {
            listener(&snapshot);
        }
        *self.latest.borrow_mut() = Some(snapshot);
    }

    fn spawn_tick_task(&mut self) {
        let (handle, registration) = AbortHandle::new_pair();
        let session = Rc::clone(&self.session);
        let latest = Rc::clone(&self.latest);
        let listener = self.on_tick.clone();
        let interval = self.tick_interval;
        let generation = session.borrow().generation();

        let ticks = async move {
            loop {
                sleep(interval).await;
                let snapshot = {
                    let mut session = session.borrow_mut();
                    if session.generation() != generation {
                        break;
                    }
                    session.tick()
                };
                if let Some(listener) = &listener {
                    listener(&snapshot);
                }
                *latest.borrow_mut() = Some(snapshot);
            }
        };

        leptos::spawn_local(async move {
            if Abortable::new(ticks, registration).await.is_err() {
                get_logger().debug(
                    LogComponent::Application("Coordinator"),
                    &format!("Tick task for generation {} aborted", generation),
                );
            }
        });
        self.tick_task = Some(handle);
    }

    fn spawn_frame_loop(&mut self) {
        let Some(renderer) = self.on_frame.clone() else {
            return;
        };
        let latest = Rc::clone(&self.latest);
        let mut animator = TrackAnimator::new();

        self.frame_task = Some(FrameLoop::start(move |timestamp| {
            animator.advance_to(timestamp);
            if let Some(snapshot) = latest.borrow().as_ref() {
                renderer(timestamp, &animator, snapshot);
            }
        }));
    }
}

impl Drop for DashboardCoordinator {
    fn drop(&mut self) {
        self.stop();
    }
}

thread_local! {
    pub static GLOBAL_COORDINATOR: RefCell<Option<DashboardCoordinator>> = const { RefCell::new(None) };
}

/// Install (and start) the page-wide coordinator, replacing any previous one.
pub fn install_global_coordinator(mut coordinator: DashboardCoordinator) {
    coordinator.start();
    GLOBAL_COORDINATOR.with(|global| {
        *global.borrow_mut() = Some(coordinator);
    });
}

pub fn with_global_coordinator<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&DashboardCoordinator) -> R,
{
    GLOBAL_COORDINATOR.with(|global| global.borrow().as_ref().map(f))
}

pub fn with_global_coordinator_mut<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut DashboardCoordinator) -> R,
{
    GLOBAL_COORDINATOR.with(|global| global.borrow_mut().as_mut().map(f))
}
