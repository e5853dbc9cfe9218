use std::path::PathBuf;

#[derive(serde::Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    /// Initial window size.
    pub viewport: [f32; 2],
    /// Image to edit when none is given on the command line.
    pub image: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport: [1024.0, 768.0],
            image: None,
        }
    }
}
