//! National park items
//!
//! The built-in catalog the application ranks. Display fields beyond the id
//! and name are carried along untouched for the UI layer.

use serde::{Deserialize, Serialize};

use crate::ranking::traits::Rankable;

/// A national park
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Park {
    /// Four-letter park code
    pub id: String,
    /// Display name
    pub name: String,
    /// State or territory
    pub state: String,
    /// Year the park was established
    pub established: u16,
    /// Optional image for the UI layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Park {
    /// Create a new park without an image
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        state: impl Into<String>,
        established: u16,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            state: state.into(),
            established,
            image_url: None,
        }
    }

    /// Attach an image URL
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

impl Rankable for Park {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

const NATIONAL_PARKS: &[(&str, &str, &str, u16)] = &[
    ("acad", "Acadia", "Maine", 1916),
    ("arch", "Arches", "Utah", 1971),
    ("badl", "Badlands", "South Dakota", 1978),
    ("bibe", "Big Bend", "Texas", 1944),
    ("bisc", "Biscayne", "Florida", 1980),
    ("blca", "Black Canyon of the Gunnison", "Colorado", 1999),
    ("brca", "Bryce Canyon", "Utah", 1928),
    ("cany", "Canyonlands", "Utah", 1964),
    ("care", "Capitol Reef", "Utah", 1971),
    ("cave", "Carlsbad Caverns", "New Mexico", 1930),
    ("chis", "Channel Islands", "California", 1980),
    ("cong", "Congaree", "South Carolina", 2003),
    ("crla", "Crater Lake", "Oregon", 1902),
    ("cuva", "Cuyahoga Valley", "Ohio", 2000),
    ("deva", "Death Valley", "California", 1994),
    ("dena", "Denali", "Alaska", 1917),
    ("drto", "Dry Tortugas", "Florida", 1992),
    ("ever", "Everglades", "Florida", 1934),
    ("gaar", "Gates of the Arctic", "Alaska", 1980),
    ("jeff", "Gateway Arch", "Missouri", 2018),
    ("glac", "Glacier", "Montana", 1910),
    ("glba", "Glacier Bay", "Alaska", 1980),
    ("grca", "Grand Canyon", "Arizona", 1919),
    ("grte", "Grand Teton", "Wyoming", 1929),
    ("grba", "Great Basin", "Nevada", 1986),
    ("grpo", "Great Sand Dunes", "Colorado", 2004),
    ("grsm", "Great Smoky Mountains", "Tennessee", 1934),
    ("gumo", "Guadalupe Mountains", "Texas", 1966),
    ("hale", "HaleakalƒÅ", "Hawaii", 1916),
    ("havo", "Hawai'i Volcanoes", "Hawaii", 1916),
    ("hosp", "Hot Springs", "Arkansas", 1921),
    ("indu", "Indiana Dunes", "Indiana", 2019),
    ("isro", "Isle Royale", "Michigan", 1940),
    ("josh", "Joshua Tree", "California", 1994),
    ("katm", "Katmai", "Alaska", 1980),
    ("kefj", "Kenai Fjords", "Alaska", 1980),
    ("king", "Kings Canyon", "California", 1980),
    ("kova", "Kobuk Valley", "Alaska", 1980),
    ("lacl", "Lake Clark", "Alaska", 1980),
    ("lavo", "Lassen Volcanic", "California", 1916),
    ("maca", "Mammoth Cave", "Kentucky", 1941),
    ("meve", "Mesa Verde", "Colorado", 1906),
    ("mora", "Mount Rainier", "Washington", 1899),
    ("npsa", "National Park of American Samoa", "American Samoa", 1988),
    ("noca", "North Cascades", "Washington", 1968),
    ("olym", "Olympic", "Washington", 1938),
    ("pefo", "Petrified Forest", "Arizona", 1962),
    ("pinn", "Pinnacles", "California", 2013),
    ("redw", "Redwood", "California", 1968),
    ("romo", "Rocky Mountain", "Colorado", 1915),
    ("sagu", "Saguaro", "Arizona", 1994),
    ("seki", "Sequoia", "California", 1890),
    ("shen", "Shenandoah", "Virginia", 1935),
    ("thro", "Theodore Roosevelt", "North Dakota", 1978),
    ("viis", "Virgin Islands", "U.S. Virgin Islands", 1956),
    ("voya", "Voyageurs", "Minnesota", 1975),
    ("whsa", "White Sands", "New Mexico", 2019),
    ("wica", "Wind Cave", "South Dakota", 1903),
    ("wrst", "Wrangell-St. Elias", "Alaska", 1980),
    ("yell", "Yellowstone", "Wyoming", 1872),
    ("yose", "Yosemite", "California", 1890),
    ("zion", "Zion", "Utah", 1919),
];

/// Every park in the built-in catalog, in catalog order
pub fn national_parks() -> Vec<Park> {
    NATIONAL_PARKS
        .iter()
        .map(|&(id, name, state, established)| Park::new(id, name, state, established))
        .collect()
}
