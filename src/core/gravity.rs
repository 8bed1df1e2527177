use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GravityPreset {
    #[default]
    Earth,
    Moon,
    Mars,
}

impl GravityPreset {
    pub const ALL: [GravityPreset; 3] = [Self::Earth, Self::Moon, Self::Mars];

    pub fn gravity_mps2(self) -> f64 {
        match self {
            Self::Earth => 9.8,
            Self::Moon => 1.62,
            Self::Mars => 3.7,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Earth => "Earth",
            Self::Moon => "Moon",
            Self::Mars => "Mars",
        }
    }

    /// Earth -> Moon -> Mars -> Earth.
    pub fn next(self) -> Self {
        match self {
            Self::Earth => Self::Moon,
            Self::Moon => Self::Mars,
            Self::Mars => Self::Earth,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(name.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::GravityPreset;

    #[test]
    fn cycle_returns_to_start_after_three_steps() {
        let start = GravityPreset::Earth;
        let moon = start.next();
        let mars = moon.next();

        assert_eq!(moon.gravity_mps2(), 1.62);
        assert_eq!(mars.gravity_mps2(), 3.7);
        assert_eq!(mars.next(), start);
        assert_eq!(mars.next().gravity_mps2(), 9.8);
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!(GravityPreset::from_name(" MARS "), Some(GravityPreset::Mars));
        assert_eq!(GravityPreset::from_name("moon"), Some(GravityPreset::Moon));
        assert_eq!(GravityPreset::from_name("jupiter"), None);
    }
}
