//! Particle-identity predicates over the PDG numbering scheme.

use particle_id::ParticleID;

use crate::types::Particle;

/// Whether the PDG code identifies a hadron.
///
/// Mesons carry two non-zero quark digits and a non-zero spin digit, baryons
/// three non-zero quark digits; the neutral-kaon mass eigenstates use special
/// codes. Diquarks, leptons, bosons and generator-internal codes all fail the
/// digit test.
pub fn is_hadron(id: ParticleID) -> bool {
    let code = id.id().unsigned_abs();
    if code == 130 || code == 310 {
        return true;
    }
    if !(101..1_000_000).contains(&code) {
        return false;
    }
    let spin = code % 10;
    let nq3 = (code / 10) % 10;
    let nq2 = (code / 100) % 10;
    let nq1 = (code / 1000) % 10;
    let meson = nq1 == 0 && nq2 != 0 && nq3 != 0 && spin != 0;
    let baryon = nq1 != 0 && nq2 != 0 && nq3 != 0;
    meson || baryon
}

/// Whether the particle is a charged hadron, the trigger-particle predicate
/// of the correlation measurements.
pub fn is_charged_hadron(particle: &Particle) -> bool {
    is_hadron(particle.id) && particle.is_charged()
}
