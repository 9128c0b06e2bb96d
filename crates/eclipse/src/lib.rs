//! Eclipse geometry: fraction of a spherical light source visible from a spacecraft
//! partially or fully hidden behind a spherical occulting body.
//!
//! Both bodies are treated as discs on the spacecraft's sky; the visible fraction is the
//! source disc area minus the overlap of the two discs.

use regress_core::constants::{EGM96_EARTH_EQUATORIAL_RADIUS_M, MOON_RADIUS_M, SUN_RADIUS_M};
use regress_core::vector::{self, Vector3};
use std::f64::consts::PI;
use thiserror::Error;

/// Equatorial radii of the bodies the regression scenarios use (m).
pub mod bodies {
    use super::*;

    pub const SUN: f64 = SUN_RADIUS_M;
    pub const EARTH: f64 = EGM96_EARTH_EQUATORIAL_RADIUS_M;
    pub const MOON: f64 = MOON_RADIUS_M;
}

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("spacecraft at {distance_m} m lies inside the occulting body (radius {radius_m} m)")]
    InsideOccultingBody { distance_m: f64, radius_m: f64 },
    #[error("spacecraft at {distance_m} m from the source lies inside it (radius {radius_m} m)")]
    InsideSource { distance_m: f64, radius_m: f64 },
}

/// Lighting condition of the spacecraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shadow {
    Umbra,
    Penumbra,
    Light,
}

impl Shadow {
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio <= 0.0 {
            Shadow::Umbra
        } else if ratio >= 1.0 {
            Shadow::Light
        } else {
            Shadow::Penumbra
        }
    }
}

/// Angles seen from the spacecraft, in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipseAngles {
    /// Angle between the directions to the source and to the occulting body centre.
    pub separation: f64,
    /// Apparent radius of the occulting body.
    pub occulting_apparent: f64,
    /// Apparent radius of the source.
    pub source_apparent: f64,
}

/// Sky angles for a spacecraft and source given relative to the occulting body centre.
pub fn eclipse_angles(
    spacecraft: &Vector3,
    source: &Vector3,
    occulting_radius: f64,
    source_radius: f64,
) -> Result<EclipseAngles, GeometryError> {
    let source_offset = vector::sub(source, spacecraft);
    let separation = vector::angle(&source_offset, &vector::neg(spacecraft));

    let distance = vector::norm(spacecraft);
    if distance <= occulting_radius {
        return Err(GeometryError::InsideOccultingBody {
            distance_m: distance,
            radius_m: occulting_radius,
        });
    }
    let source_distance = vector::norm(&source_offset);
    if source_distance <= source_radius {
        return Err(GeometryError::InsideSource {
            distance_m: source_distance,
            radius_m: source_radius,
        });
    }

    Ok(EclipseAngles {
        separation,
        occulting_apparent: (occulting_radius / distance).asin(),
        source_apparent: (source_radius / source_distance).asin(),
    })
}

/// Visible fraction of the source in `[0, 1]`; 0 is full umbra, 1 full light.
///
/// Positions are relative to the occulting body centre, radii in the same length unit.
pub fn illumination_ratio(
    spacecraft: &Vector3,
    source: &Vector3,
    occulting_radius: f64,
    source_radius: f64,
) -> Result<f64, GeometryError> {
    let angles = eclipse_angles(spacecraft, source, occulting_radius, source_radius)?;
    Ok(ratio_from_angles(
        angles.separation,
        angles.occulting_apparent,
        angles.source_apparent,
    ))
}

/// Visible fraction of a disc of apparent radius `source` whose centre lies `separation`
/// away from an occulting disc of apparent radius `occulting`.
pub fn ratio_from_angles(separation: f64, occulting: f64, source: f64) -> f64 {
    if separation - occulting + source <= 0.0 {
        return 0.0;
    }
    if separation - occulting - source >= 0.0 {
        return 1.0;
    }

    let s2 = source * source;
    let o2 = occulting * occulting;
    // Occulting disc entirely inside the source disc.
    if separation <= source - occulting {
        return (1.0 - o2 / s2).clamp(0.0, 1.0);
    }

    let sep2 = separation * separation;
    let inv_2sep = 1.0 / (2.0 * separation);
    let alpha1 = (sep2 - (o2 - s2)) * inv_2sep;
    let alpha2 = (sep2 + (o2 - s2)) * inv_2sep;

    let a1_over_s = (alpha1 / source).clamp(-1.0, 1.0);
    let s2_minus_a1 = (s2 - alpha1 * alpha1).max(0.0);
    let a2_over_o = (alpha2 / occulting).clamp(-1.0, 1.0);
    let o2_minus_a2 = (o2 - alpha2 * alpha2).max(0.0);

    let p1 = s2 * a1_over_s.acos() - alpha1 * s2_minus_a1.sqrt();
    let p2 = o2 * a2_over_o.acos() - alpha2 * o2_minus_a2.sqrt();

    (1.0 - (p1 + p2) / (PI * s2)).clamp(0.0, 1.0)
}

/// Inputs of a single illumination evaluation, positions expressed in a common frame.
#[derive(Debug, Clone)]
pub struct EclipseInputs {
    /// Spacecraft position (m).
    pub spacecraft_position: Vector3,
    /// Name of the frame the positions are expressed in.
    pub frame: String,
    /// Evaluation epoch (s since scenario start).
    pub epoch_s: f64,
    /// Equatorial radius of the occulting body (m).
    pub occulting_radius: f64,
    /// Occulting body centre (m).
    pub occulting_position: Vector3,
    /// Light source centre (m).
    pub source_position: Vector3,
    /// Light source radius (m).
    pub source_radius: f64,
}

impl EclipseInputs {
    /// Earth-centred inputs with the Sun as source.
    pub fn earth_sun(spacecraft_position: Vector3, sun_position: Vector3) -> Self {
        Self {
            spacecraft_position,
            frame: "EME2000".to_string(),
            epoch_s: 0.0,
            occulting_radius: bodies::EARTH,
            occulting_position: vector::ZERO,
            source_position: sun_position,
            source_radius: bodies::SUN,
        }
    }

    pub fn illumination_ratio(&self) -> Result<f64, GeometryError> {
        let spacecraft = vector::sub(&self.spacecraft_position, &self.occulting_position);
        let source = vector::sub(&self.source_position, &self.occulting_position);
        illumination_ratio(
            &spacecraft,
            &source,
            self.occulting_radius,
            self.source_radius,
        )
    }

    pub fn shadow(&self) -> Result<Shadow, GeometryError> {
        self.illumination_ratio().map(Shadow::from_ratio)
    }
}
