//! Annual profections.
//!
//! Each year of life advances the active house by one whole sign from the
//! ascendant. The traditional ruler of that sign is the year's time lord.

use serde::{Deserialize, Serialize};

use super::rulers::traditional_ruler;
use super::signs::ZodiacSign;
use crate::ephemeris::Body;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfectionResult {
    pub age: u32,
    /// House 1-12 activated this year.
    pub active_house: u8,
    pub profected_sign: ZodiacSign,
    pub time_lord: Body,
    pub theme: String,
}

/// Thematic label for a house.
pub fn house_theme(house: u8) -> &'static str {
    match house {
        1 => "Self and Identity",
        2 => "Resources and Values",
        3 => "Communication and Siblings",
        4 => "Home and Roots",
        5 => "Creativity and Pleasure",
        6 => "Health and Daily Work",
        7 => "Partnerships",
        8 => "Transformation and Shared Resources",
        9 => "Travel and Higher Learning",
        10 => "Career and Public Reputation",
        11 => "Friends and Aspirations",
        _ => "Solitude and Hidden Matters",
    }
}

/// Profect from the ascendant (house 1).
pub fn profect(age: u32, ascendant_sign: ZodiacSign) -> ProfectionResult {
    profect_from(age, 1, ascendant_sign)
}

/// Profect from an arbitrary starting house.
pub fn profect_from(age: u32, start_house: u8, ascendant_sign: ZodiacSign) -> ProfectionResult {
    let start = u32::from(start_house.clamp(1, 12)) - 1;
    let active_house = ((start + age) % 12 + 1) as u8;
    let profected_sign = ascendant_sign.advance(u32::from(active_house) - 1);

    ProfectionResult {
        age,
        active_house,
        profected_sign,
        time_lord: traditional_ruler(profected_sign),
        theme: house_theme(active_house).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_thirty_activates_seventh() {
        let result = profect(30, ZodiacSign::Aries);
        assert_eq!(result.active_house, 7);
        assert_eq!(result.profected_sign, ZodiacSign::Libra);
        assert_eq!(result.time_lord, Body::Venus);
        assert_eq!(result.theme, "Partnerships");
    }

    #[test]
    fn birth_year_is_first_house() {
        let result = profect(0, ZodiacSign::Leo);
        assert_eq!(result.active_house, 1);
        assert_eq!(result.time_lord, Body::Sun);
        assert_eq!(result.theme, "Self and Identity");
    }

    #[test]
    fn twelve_year_cycle() {
        for age in 0..60 {
            let a = profect(age, ZodiacSign::Scorpio);
            let b = profect(age + 12, ZodiacSign::Scorpio);
            assert_eq!(a.active_house, b.active_house);
            assert_eq!(a.time_lord, b.time_lord);
        }
    }

    #[test]
    fn starting_house_offsets() {
        assert_eq!(profect_from(2, 10, ZodiacSign::Aries).active_house, 12);
        assert_eq!(profect_from(3, 10, ZodiacSign::Aries).active_house, 1);
    }
}
