//! Event loop of the navigation screen
//!
//! The screen owns the tracking session, the pending fit timers and the
//! model. Tasks only ever send messages; all state changes happen inside
//! [`NavigationScreen::process`] and the input methods, on the caller's
//! thread.

use smol::channel::{self, Receiver, Sender};
use smol::{LocalExecutor, Task, Timer};
use std::rc::Rc;
use tracing::{debug, info};

use crate::destination::PendingFit;
use crate::display::MapDisplay;
use crate::provider::LocationProvider;
use crate::screen::{Command, Message, NavigationModel};
use crate::tracking::{TrackerEvent, TrackingSession};
use crate::utils::config::ScreenConfig;

/// A mounted navigation screen driving a map display
pub struct NavigationScreen<'ex, 'a, D: MapDisplay> {
    executor: &'ex LocalExecutor<'a>,
    display: D,
    model: NavigationModel,
    session: TrackingSession,
    tracker_events: Receiver<TrackerEvent>,
    fit_sender: Sender<PendingFit>,
    fits_due: Receiver<PendingFit>,
    fit_timers: Vec<Task<()>>,
    unmounted: bool,
}

impl<'ex, 'a, D: MapDisplay> NavigationScreen<'ex, 'a, D> {
    /// Start tracking and render the first frame
    pub fn mount<P>(
        executor: &'ex LocalExecutor<'a>,
        provider: Rc<P>,
        display: D,
        config: ScreenConfig,
    ) -> Self
    where
        P: LocationProvider + 'a,
    {
        let (tracker_sender, tracker_events) = channel::unbounded();
        let (fit_sender, fits_due) = channel::unbounded();
        let session = TrackingSession::start(executor, provider, config.watch.clone(), tracker_sender);
        info!(title = %config.title, "navigation screen mounted");

        let mut screen = Self {
            executor,
            display,
            model: NavigationModel::new(&config),
            session,
            tracker_events,
            fit_sender,
            fits_due,
            fit_timers: Vec::new(),
            unmounted: false,
        };
        screen.render();
        screen
    }

    /// Apply every message that has arrived since the last call.
    ///
    /// Tracker events are applied before due fits so a fit always frames the
    /// latest position. Renders once if anything changed. Returns the number
    /// of messages handled; always zero after unmount.
    pub fn process(&mut self) -> usize {
        if self.unmounted {
            return 0;
        }

        let mut handled = 0;
        let mut changed = false;

        while let Ok(event) = self.tracker_events.try_recv() {
            handled += 1;
            changed |= self.dispatch(Message::Tracker(event));
        }
        while let Ok(pending) = self.fits_due.try_recv() {
            handled += 1;
            changed |= self.dispatch(Message::FitDue(pending));
        }
        self.fit_timers.retain(|timer| !timer.is_finished());

        if changed {
            self.render();
        }
        handled
    }

    /// Replace the destination text
    pub fn set_input(&mut self, text: impl Into<String>) {
        if self.unmounted {
            return;
        }
        if self.dispatch(Message::InputChanged(text.into())) {
            self.render();
        }
    }

    /// Press the submit button. Returns whether a destination was accepted.
    pub fn submit(&mut self) -> bool {
        if self.unmounted {
            return false;
        }
        let accepted = self.dispatch(Message::Submit);
        if accepted {
            self.render();
        }
        accepted
    }

    /// Stop tracking and cancel pending fits. Safe to call more than once.
    pub fn unmount(&mut self) {
        if self.unmounted {
            return;
        }
        self.unmounted = true;
        self.session.stop();
        let cancelled_fits = self.fit_timers.len();
        self.fit_timers.clear();
        info!(cancelled_fits, "navigation screen unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        !self.unmounted
    }

    pub fn is_tracking(&self) -> bool {
        self.session.is_active()
    }

    pub fn pending_fits(&self) -> usize {
        self.fit_timers.iter().filter(|timer| !timer.is_finished()).count()
    }

    pub fn model(&self) -> &NavigationModel {
        &self.model
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    fn dispatch(&mut self, message: Message) -> bool {
        let update = self.model.update(message);
        if let Some(command) = update.command {
            self.execute(command);
        }
        update.changed
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::ScheduleFit(pending) => {
                let sender = self.fit_sender.clone();
                let timer = self.executor.spawn(async move {
                    Timer::after(pending.delay).await;
                    let _ = sender.send(pending).await;
                });
                self.fit_timers.push(timer);
            }
            Command::Fit(request) => {
                debug!(
                    from_latitude = request.coordinates[0].latitude,
                    from_longitude = request.coordinates[0].longitude,
                    to_latitude = request.coordinates[1].latitude,
                    to_longitude = request.coordinates[1].longitude,
                    "fitting camera to destination"
                );
                self.display
                    .fit_to_coordinates(&request.coordinates, &request.options);
            }
        }
    }

    fn render(&mut self) {
        let frame = self.model.view();
        self.display.render(&frame);
    }
}

impl<D: MapDisplay> Drop for NavigationScreen<'_, '_, D> {
    fn drop(&mut self) {
        self.unmount();
    }
}
