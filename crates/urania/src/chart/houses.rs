//! Whole-sign house assignment.

use serde::{Deserialize, Serialize};

use crate::ephemeris::{Body, PlanetPosition};
use crate::western::ZodiacSign;

/// House 1-12 of a sign counted whole-sign from the ascendant's sign.
pub fn whole_sign_house(sign: ZodiacSign, ascendant_sign: ZodiacSign) -> u8 {
    (sign.index() + 12 - ascendant_sign.index()) % 12 + 1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousePlacement {
    pub body: Body,
    pub sign: ZodiacSign,
    pub house: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseAssignment {
    pub ascendant_sign: ZodiacSign,
    pub placements: Vec<HousePlacement>,
}

impl HouseAssignment {
    pub fn assign(ascendant_sign: ZodiacSign, planets: &[PlanetPosition]) -> Self {
        let placements = planets
            .iter()
            .map(|p| {
                let sign = ZodiacSign::from_index(p.sign);
                HousePlacement {
                    body: p.body,
                    sign,
                    house: whole_sign_house(sign, ascendant_sign),
                }
            })
            .collect();
        Self {
            ascendant_sign,
            placements,
        }
    }

    pub fn house_of(&self, body: Body) -> Option<u8> {
        self.placements
            .iter()
            .find(|p| p.body == body)
            .map(|p| p.house)
    }

    /// Sign occupying `house`.
    pub fn sign_on(&self, house: u8) -> ZodiacSign {
        self.ascendant_sign
            .advance(u32::from(house.clamp(1, 12)) - 1)
    }
}
