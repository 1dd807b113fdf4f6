//! Static lookup tables for supported cities: coordinates and emergency contacts.

use std::collections::HashMap;

use crate::model::{CityId, CityMeta, Coordinates, EmergencyContacts};
use crate::ports::PortError;

const CITY_COORDINATES: [(&str, f64, f64); 20] = [
    ("Manila", 14.5995, 120.9842),
    ("Quezon City", 14.6760, 121.0437),
    ("Caloocan", 14.6488, 120.9676),
    ("Davao", 7.1907, 125.4553),
    ("Cebu City", 10.3157, 123.8854),
    ("Zamboanga City", 6.9214, 122.0790),
    ("Antipolo", 14.5832, 121.1815),
    ("Taguig", 14.5176, 121.0509),
    ("Pasig", 14.5764, 121.0851),
    ("Cagayan de Oro", 8.4542, 124.6319),
    ("Parañaque", 14.4793, 121.0198),
    ("Valenzuela", 14.7000, 120.9831),
    ("Bacoor", 14.4590, 120.9446),
    ("General Santos", 6.1164, 125.1716),
    ("Las Piñas", 14.4378, 120.9761),
    ("Makati", 14.5547, 121.0244),
    ("Bacolod", 10.6770, 122.9500),
    ("Muntinlupa", 14.3832, 121.0409),
    ("Baguio", 16.4023, 120.5960),
    ("Iloilo City", 10.7202, 122.5621),
];

// city, DepEd office, DepEd phone, mayor's office, mayor's phone
const CITY_CONTACTS: [(&str, &str, &str, &str, &str); 4] = [
    (
        "Manila",
        "DepEd Manila",
        "+63 2 8123 4567",
        "Manila Mayor's Office",
        "+63 2 8527 4034",
    ),
    (
        "Quezon City",
        "DepEd Quezon City",
        "+63 2 8988 4242",
        "Quezon City Mayor's Office",
        "+63 2 8988 4242",
    ),
    (
        "Cebu City",
        "DepEd Cebu City",
        "+63 32 255 1681",
        "Cebu City Mayor's Office",
        "+63 32 255 8181",
    ),
    (
        "Davao",
        "DepEd Davao",
        "+63 82 227 8592",
        "Davao Mayor's Office",
        "+63 82 227 1000",
    ),
];

const EMERGENCY_HOTLINE: &str = "911";

/// Read-only directory resolving cities to coordinates and contacts.
pub struct CityDirectory {
    cities: HashMap<CityId, CityMeta>,
    contacts: HashMap<CityId, EmergencyContacts>,
}

impl CityDirectory {
    /// Build a directory from explicit tables.
    #[must_use]
    pub fn new(cities: Vec<CityMeta>, contacts: Vec<(CityId, EmergencyContacts)>) -> Self {
        let cities_map = cities
            .into_iter()
            .map(|meta| (meta.id.clone(), meta))
            .collect();
        Self {
            cities: cities_map,
            contacts: contacts.into_iter().collect(),
        }
    }

    /// Directory of the built-in Philippine cities.
    #[must_use]
    pub fn philippines() -> Self {
        let cities = CITY_COORDINATES
            .iter()
            .map(|&(name, latitude, longitude)| CityMeta {
                id: CityId::from(name),
                name: name.to_owned(),
                coordinates: Coordinates {
                    latitude,
                    longitude,
                },
            })
            .collect();

        let contacts = CITY_CONTACTS
            .iter()
            .map(
                |&(name, deped_office, deped_phone, mayor_office, mayor_phone)| {
                    (
                        CityId::from(name),
                        EmergencyContacts {
                            deped_office: deped_office.to_owned(),
                            deped_phone: deped_phone.to_owned(),
                            mayor_office: mayor_office.to_owned(),
                            mayor_phone: mayor_phone.to_owned(),
                            emergency: EMERGENCY_HOTLINE.to_owned(),
                        },
                    )
                },
            )
            .collect();

        Self::new(cities, contacts)
    }

    /// Return metadata for all cities, sorted by name.
    #[must_use]
    pub fn cities(&self) -> Vec<CityMeta> {
        let mut cities: Vec<CityMeta> = self.cities.values().cloned().collect();
        cities.sort_by(|left, right| left.name.cmp(&right.name));
        cities
    }

    /// Look up the metadata of a city.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::UnsupportedCity`] when the city is not listed.
    pub fn city(&self, city: &CityId) -> Result<&CityMeta, PortError> {
        self.cities
            .get(city)
            .ok_or_else(|| PortError::UnsupportedCity(city.clone()))
    }

    /// Look up the coordinates of a city.
    ///
    /// # Errors
    ///
    /// Returns [`PortError::UnsupportedCity`] when the city is not listed.
    pub fn coordinates(&self, city: &CityId) -> Result<Coordinates, PortError> {
        self.city(city).map(|meta| meta.coordinates)
    }

    /// Contacts for a city, with a generic entry for cities without their own.
    #[must_use]
    pub fn contacts(&self, city: &CityId) -> EmergencyContacts {
        self.contacts
            .get(city)
            .cloned()
            .unwrap_or_else(|| EmergencyContacts {
                deped_office: format!("DepEd {city}"),
                deped_phone: String::from("Contact local DepEd office"),
                mayor_office: format!("{city} Mayor's Office"),
                mayor_phone: String::from("Contact local government"),
                emergency: EMERGENCY_HOTLINE.to_owned(),
            })
    }
}

impl Default for CityDirectory {
    fn default() -> Self {
        Self::philippines()
    }
}
