//! Sign rulers for Western astrology.
//!
//! Maps zodiac signs to their planetary rulers (traditional and modern).

use super::signs::ZodiacSign;
use crate::ephemeris::Body;

/// Traditional (seven-planet) domicile ruler.
pub fn traditional_ruler(sign: ZodiacSign) -> Body {
    match sign {
        ZodiacSign::Aries => Body::Mars,
        ZodiacSign::Taurus => Body::Venus,
        ZodiacSign::Gemini => Body::Mercury,
        ZodiacSign::Cancer => Body::Moon,
        ZodiacSign::Leo => Body::Sun,
        ZodiacSign::Virgo => Body::Mercury,
        ZodiacSign::Libra => Body::Venus,
        ZodiacSign::Scorpio => Body::Mars,
        ZodiacSign::Sagittarius => Body::Jupiter,
        ZodiacSign::Capricorn => Body::Saturn,
        ZodiacSign::Aquarius => Body::Saturn,
        ZodiacSign::Pisces => Body::Jupiter,
    }
}

/// Modern ruler: outer planets take Scorpio, Aquarius and Pisces.
pub fn modern_ruler(sign: ZodiacSign) -> Body {
    match sign {
        ZodiacSign::Scorpio => Body::Pluto,
        ZodiacSign::Aquarius => Body::Uranus,
        ZodiacSign::Pisces => Body::Neptune,
        other => traditional_ruler(other),
    }
}

/// Signs a body rules. Classical planets use the traditional scheme, outer
/// planets their modern sign. Nodes rule nothing.
pub fn domiciles(body: Body) -> &'static [ZodiacSign] {
    match body {
        Body::Sun => &[ZodiacSign::Leo],
        Body::Moon => &[ZodiacSign::Cancer],
        Body::Mercury => &[ZodiacSign::Gemini, ZodiacSign::Virgo],
        Body::Venus => &[ZodiacSign::Taurus, ZodiacSign::Libra],
        Body::Mars => &[ZodiacSign::Aries, ZodiacSign::Scorpio],
        Body::Jupiter => &[ZodiacSign::Sagittarius, ZodiacSign::Pisces],
        Body::Saturn => &[ZodiacSign::Capricorn, ZodiacSign::Aquarius],
        Body::Uranus => &[ZodiacSign::Aquarius],
        Body::Neptune => &[ZodiacSign::Pisces],
        Body::Pluto => &[ZodiacSign::Scorpio],
        Body::NorthNode | Body::SouthNode => &[],
    }
}
