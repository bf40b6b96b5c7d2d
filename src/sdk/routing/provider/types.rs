use serde::Deserialize;

// --- Wire formats of the OSRM route service ---

#[derive(Deserialize, Debug)]
pub struct OsrmResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

#[derive(Deserialize, Debug)]
pub struct OsrmRoute {
    pub geometry: LineString,
    pub duration: f64,
    #[serde(default)]
    pub distance: f64,
}

#[derive(Deserialize, Debug)]
pub struct LineString {
    pub coordinates: Vec<[f64; 2]>,
}
