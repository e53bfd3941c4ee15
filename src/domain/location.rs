use crate::error::{Result, WorkflowError};
use serde::Serialize;

/// Every backdrop the processing service knows how to composite against.
/// Configuration data: the workflow only cares that a selection comes
/// from this list.
pub const LANDMARKS: [&str; 38] = [
    "Eiffel Tower (Paris, France)",
    "Great Wall of China (China)",
    "Taj Mahal (Agra, India)",
    "Statue of Liberty (New York, USA)",
    "Machu Picchu (Peru)",
    "Colosseum (Rome, Italy)",
    "Christ the Redeemer (Rio de Janeiro, Brazil)",
    "Petra (Jordan)",
    "Pyramids of Giza (Egypt)",
    "Sydney Opera House (Sydney, Australia)",
    "Big Ben (London, UK)",
    "Sagrada Familia (Barcelona, Spain)",
    "Golden Gate Bridge (San Francisco, USA)",
    "Mount Fuji (Japan)",
    "Santorini (Greece)",
    "Burj Khalifa (Dubai, UAE)",
    "Angkor Wat (Cambodia)",
    "Stonehenge (England, UK)",
    "Niagara Falls (Canada/USA)",
    "Grand Canyon (Arizona, USA)",
    "Times Square (New York, USA)",
    "Leaning Tower of Pisa (Italy)",
    "Neuschwanstein Castle (Germany)",
    "Moai Statues (Easter Island, Chile)",
    "Acropolis (Athens, Greece)",
    "Brandenburg Gate (Berlin, Germany)",
    "Charles Bridge (Prague, Czech Republic)",
    "Chichen Itza (Mexico)",
    "Table Mountain (Cape Town, South Africa)",
    "Banff National Park (Canada)",
    "Ha Long Bay (Vietnam)",
    "Matterhorn (Switzerland)",
    "Dubrovnik Old Town (Croatia)",
    "Mount Kilimanjaro (Tanzania)",
    "Red Square (Moscow, Russia)",
    "Louvre Museum (Paris, France)",
    "Tower Bridge (London, UK)",
    "Victoria Falls (Zambia/Zimbabwe)",
];

pub const DEFAULT_LANDMARK: &str = LANDMARKS[0];

/// A validated landmark label. Constructing one is the only place the
/// catalogue is consulted, so the dispatcher can trust any `Landmark` it
/// is handed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Landmark(String);

impl Landmark {
    pub fn parse(label: &str) -> Result<Self> {
        if LANDMARKS.contains(&label) {
            Ok(Self(label.to_string()))
        } else {
            Err(WorkflowError::UnknownLocation(label.to_string()))
        }
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

impl Default for Landmark {
    fn default() -> Self {
        Self(DEFAULT_LANDMARK.to_string())
    }
}
