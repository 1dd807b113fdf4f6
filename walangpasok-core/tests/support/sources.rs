//! Announcement sources with fixed behaviour for the aggregation suite.

use async_trait::async_trait;
use walangpasok_core::{AnnouncementRecord, AnnouncementSource, CityId, PortError, Status};

use crate::fake_ports::timestamp;

pub(crate) fn record(id: &str, date: &str) -> AnnouncementRecord {
    AnnouncementRecord {
        id: id.to_owned(),
        city: CityId::from("Manila"),
        status: Status::Suspended,
        date: timestamp(date),
        reason: String::from("Due to typhoon"),
        source: String::from("Test"),
        source_url: None,
        level: String::from("All levels"),
        verified: true,
        title: None,
    }
}

/// Source answering with fixed records.
pub(crate) struct StaticSource {
    pub(crate) kind: &'static str,
    pub(crate) records: Vec<AnnouncementRecord>,
}

#[async_trait]
impl AnnouncementSource for StaticSource {
    fn kind(&self) -> &str {
        self.kind
    }

    async fn fetch(&self, _city: &CityId) -> Result<Vec<AnnouncementRecord>, PortError> {
        Ok(self.records.clone())
    }
}

/// Source that always fails.
pub(crate) struct FailingSource;

#[async_trait]
impl AnnouncementSource for FailingSource {
    fn kind(&self) -> &str {
        "failing"
    }

    async fn fetch(&self, _city: &CityId) -> Result<Vec<AnnouncementRecord>, PortError> {
        Err(PortError::Upstream(String::from("rejected")))
    }
}

/// Source that panics mid-fetch.
pub(crate) struct PanickingSource;

#[async_trait]
impl AnnouncementSource for PanickingSource {
    fn kind(&self) -> &str {
        "panicking"
    }

    async fn fetch(&self, _city: &CityId) -> Result<Vec<AnnouncementRecord>, PortError> {
        panic!("source blew up");
    }
}
