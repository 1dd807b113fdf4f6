//! Periodic and on-demand refresh of the selected city.
//!
//! Every response is tagged with the selection it was issued for. Timers are restarted on each
//! selection change, but one-off requests already in flight are not cancelled; their responses
//! are filtered out by [`RefreshScheduler::accept`] once the selection has moved on.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::model::{AnnouncementRecord, CityId, NewsArticle, WeatherReading};
use crate::service::WalangPasokService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Refresh cadence of the periodic widgets.
pub struct RefreshIntervals {
    /// Announcement list period.
    pub announcements: Duration,
    /// Weather panel period.
    pub weather: Duration,
}

impl Default for RefreshIntervals {
    fn default() -> Self {
        Self {
            announcements: Duration::from_secs(5 * 60),
            weather: Duration::from_secs(10 * 60),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Independently refreshed panels of the presentation layer.
pub enum Widget {
    /// Merged announcement list.
    Announcements,
    /// Current weather.
    Weather,
    /// School-suspension news.
    News,
}

impl Widget {
    /// Every widget, in display order.
    pub const ALL: [Widget; 3] = [Widget::Announcements, Widget::Weather, Widget::News];
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Identifies the city selection a request was issued for.
pub struct SelectionTag {
    /// Selected city.
    pub city: CityId,
    /// Counter bumped on every selection change.
    pub generation: u64,
}

#[derive(Debug, Clone)]
/// Result of one refresh.
pub enum RefreshPayload {
    /// Announcements, newest first.
    Announcements(Vec<AnnouncementRecord>),
    /// Weather reading, `None` when unavailable.
    Weather(Option<WeatherReading>),
    /// News articles.
    News(Vec<NewsArticle>),
}

impl RefreshPayload {
    /// Widget this payload belongs to.
    #[must_use]
    pub fn widget(&self) -> Widget {
        match self {
            RefreshPayload::Announcements(_) => Widget::Announcements,
            RefreshPayload::Weather(_) => Widget::Weather,
            RefreshPayload::News(_) => Widget::News,
        }
    }
}

#[derive(Debug, Clone)]
/// Tagged refresh result delivered to the presentation layer.
pub struct RefreshUpdate {
    /// Selection the request was issued for.
    pub tag: SelectionTag,
    /// Fetched data.
    pub payload: RefreshPayload,
}

/// Drives refreshes for the currently selected city.
pub struct RefreshScheduler {
    service: Arc<WalangPasokService>,
    intervals: RefreshIntervals,
    updates: UnboundedSender<RefreshUpdate>,
    selection: Option<SelectionTag>,
    generation: u64,
    timers: Vec<JoinHandle<()>>,
}

impl RefreshScheduler {
    /// Create a scheduler and the receiving end of its update channel.
    #[must_use]
    pub fn new(
        service: Arc<WalangPasokService>,
        intervals: RefreshIntervals,
    ) -> (Self, UnboundedReceiver<RefreshUpdate>) {
        let (updates, receiver) = mpsc::unbounded_channel();
        let scheduler = Self {
            service,
            intervals,
            updates,
            selection: None,
            generation: 0,
            timers: Vec::new(),
        };
        (scheduler, receiver)
    }

    /// Currently selected city, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&SelectionTag> {
        self.selection.as_ref()
    }

    /// Switch to a city: stop the old timers, start new ones and fetch everything immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn select_city(&mut self, city: CityId) -> SelectionTag {
        self.stop_timers();
        self.generation += 1;
        let tag = SelectionTag {
            city,
            generation: self.generation,
        };
        info!(city = %tag.city, generation = tag.generation, "city selected");

        self.timers = vec![
            self.spawn_timer(tag.clone(), Widget::Announcements, self.intervals.announcements),
            self.spawn_timer(tag.clone(), Widget::Weather, self.intervals.weather),
        ];
        // News has no timer; it is fetched on selection and on demand only.
        self.spawn_once(tag.clone(), Widget::News);

        self.selection = Some(tag.clone());
        tag
    }

    /// Fetch a widget right away for the current selection.
    ///
    /// Races freely with the timers. Returns `None` when no city is selected.
    pub fn refresh_now(&self, widget: Widget) -> Option<SelectionTag> {
        let tag = self.selection.clone()?;
        debug!(city = %tag.city, ?widget, "manual refresh");
        self.spawn_once(tag.clone(), widget);
        Some(tag)
    }

    /// Drop the current selection and stop its timers.
    pub fn clear_selection(&mut self) {
        self.stop_timers();
        self.selection = None;
    }

    /// Whether a tag still matches the current selection.
    #[must_use]
    pub fn is_current(&self, tag: &SelectionTag) -> bool {
        self.selection.as_ref() == Some(tag)
    }

    /// Unwrap an update if it belongs to the current selection; stale updates are dropped.
    #[must_use]
    pub fn accept(&self, update: RefreshUpdate) -> Option<RefreshPayload> {
        if self.is_current(&update.tag) {
            Some(update.payload)
        } else {
            debug!(
                city = %update.tag.city,
                generation = update.tag.generation,
                widget = ?update.payload.widget(),
                "discarding stale refresh"
            );
            None
        }
    }

    fn spawn_timer(&self, tag: SelectionTag, widget: Widget, period: Duration) -> JoinHandle<()> {
        let service = Arc::clone(&self.service);
        let updates = self.updates.clone();
        tokio::spawn(async move {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                debug!(city = %tag.city, ?widget, "scheduled refresh");
                let payload = fetch(&service, widget, &tag.city).await;
                let update = RefreshUpdate {
                    tag: tag.clone(),
                    payload,
                };
                if updates.send(update).is_err() {
                    // receiver gone
                    break;
                }
            }
        })
    }

    fn spawn_once(&self, tag: SelectionTag, widget: Widget) {
        let service = Arc::clone(&self.service);
        let updates = self.updates.clone();
        tokio::spawn(async move {
            let payload = fetch(&service, widget, &tag.city).await;
            // A closed receiver means nobody is interested any more.
            let _ignored = updates.send(RefreshUpdate { tag, payload });
        });
    }

    fn stop_timers(&mut self) {
        for timer in self.timers.drain(..) {
            timer.abort();
        }
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.stop_timers();
    }
}

async fn fetch(service: &WalangPasokService, widget: Widget, city: &CityId) -> RefreshPayload {
    match widget {
        Widget::Announcements => {
            RefreshPayload::Announcements(service.fetch_announcements(city).await)
        }
        Widget::Weather => RefreshPayload::Weather(service.fetch_weather(city).await),
        Widget::News => RefreshPayload::News(service.fetch_school_news(city).await),
    }
}
