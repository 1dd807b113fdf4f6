use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Local};
use walangpasok_core::{
    model::{AnnouncementRecord, CityId, CityMeta, EmergencyContacts, NewsArticle, WeatherReading},
    refresh::{RefreshPayload, RefreshScheduler, RefreshUpdate, Widget},
    service::WalangPasokService,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    CitySelect,
    CityStatus,
    News,
}

pub(crate) struct App {
    pub service: Arc<WalangPasokService>,
    pub scheduler: RefreshScheduler,

    pub screen: Screen,
    pub cities: Vec<CityMeta>,
    pub city_list_index: usize,
    pub selected_city: Option<CityId>,
    pub contacts: Option<EmergencyContacts>,

    pub announcements: Vec<AnnouncementRecord>,
    pub weather: Option<WeatherReading>,
    pub news: Vec<NewsArticle>,

    pub loading: HashSet<Widget>,
    pub last_updated: HashMap<Widget, DateTime<Local>>,
}

impl App {
    pub(crate) fn new(service: Arc<WalangPasokService>, scheduler: RefreshScheduler) -> Self {
        let cities = service.cities();
        Self {
            service,
            scheduler,
            screen: Screen::CitySelect,
            cities,
            city_list_index: 0,
            selected_city: None,
            contacts: None,
            announcements: Vec::new(),
            weather: None,
            news: Vec::new(),
            loading: HashSet::new(),
            last_updated: HashMap::new(),
        }
    }

    pub(crate) fn select_current_city(&mut self) {
        let Some(meta) = self.cities.get(self.city_list_index) else {
            return;
        };
        let city = meta.id.clone();

        // Nothing from the previous city may linger on screen.
        self.announcements.clear();
        self.weather = None;
        self.news.clear();
        self.last_updated.clear();
        self.loading = Widget::ALL.into_iter().collect();
        self.contacts = Some(self.service.emergency_contacts(&city));

        self.scheduler.select_city(city.clone());
        self.selected_city = Some(city);
        self.screen = Screen::CityStatus;
    }

    pub(crate) fn back_to_cities(&mut self) {
        self.scheduler.clear_selection();
        self.selected_city = None;
        self.contacts = None;
        self.loading.clear();
        self.screen = Screen::CitySelect;
    }

    pub(crate) fn refresh_current_screen(&mut self) {
        let widgets: &[Widget] = match self.screen {
            Screen::CitySelect => &[],
            Screen::CityStatus => &[Widget::Announcements, Widget::Weather],
            Screen::News => &[Widget::News],
        };
        for widget in widgets {
            if self.scheduler.refresh_now(*widget).is_some() {
                self.loading.insert(*widget);
            }
        }
    }

    /// Apply a refresh result unless it belongs to an earlier selection.
    pub(crate) fn apply(&mut self, update: RefreshUpdate) {
        let Some(payload) = self.scheduler.accept(update) else {
            return;
        };
        let widget = payload.widget();
        self.loading.remove(&widget);
        self.last_updated.insert(widget, Local::now());

        match payload {
            RefreshPayload::Announcements(records) => self.announcements = records,
            RefreshPayload::Weather(reading) => self.weather = reading,
            RefreshPayload::News(articles) => self.news = articles,
        }
    }

    pub(crate) fn is_loading(&self, widget: Widget) -> bool {
        self.loading.contains(&widget)
    }

    pub(crate) fn updated_label(&self, widget: Widget) -> String {
        self.last_updated.get(&widget).map_or_else(
            || String::from("never updated"),
            |at| format!("updated {}", at.format("%H:%M:%S")),
        )
    }

    pub(crate) fn selected_city_name(&self) -> &str {
        self.selected_city.as_ref().map_or("<city>", CityId::as_str)
    }
}
