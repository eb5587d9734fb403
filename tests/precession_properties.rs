use approx::assert_relative_eq;
use radcorr::conversion::{parse_dec_to_deg, parse_ra_to_deg};
use radcorr::{precess, precess_batch, premat, AngleUnit, EquatorialCoordinate, PrecessionFrame};

const FRAMES: [PrecessionFrame; 2] = [PrecessionFrame::FK4, PrecessionFrame::FK5];

fn grid() -> Vec<(f64, f64)> {
    let mut coords = Vec::new();
    for i in 0..12 {
        for j in 0..7 {
            coords.push((i as f64 * 30.0 + 7.5, -80.0 + j as f64 * 26.0));
        }
    }
    coords
}

#[test]
fn test_identity_for_any_epoch() {
    for frame in FRAMES {
        for epoch in [1800.0, 1950.0, 2000.0, 2200.0] {
            for (ra, dec) in grid() {
                let out = precess(
                    EquatorialCoordinate::new(ra, dec),
                    epoch,
                    epoch,
                    frame,
                    AngleUnit::Degrees,
                );
                assert_relative_eq!(out.ra, ra, epsilon = 1e-9);
                assert_relative_eq!(out.dec, dec, epsilon = 1e-9);
            }
        }
    }
}

#[test]
fn test_round_trip_within_validity_window() {
    let pairs = [(2000.0, 1950.0), (1950.0, 2000.0), (2000.0, 2025.0), (1900.0, 2100.0)];
    for frame in FRAMES {
        for (e1, e2) in pairs {
            for (ra, dec) in grid() {
                let coord = EquatorialCoordinate::new(ra, dec);
                let there = precess(coord, e1, e2, frame, AngleUnit::Degrees);
                let back = precess(there, e2, e1, frame, AngleUnit::Degrees);
                assert_relative_eq!(back.ra, ra, epsilon = 1e-5);
                assert_relative_eq!(back.dec, dec, epsilon = 1e-6);
            }
        }
    }
}

#[test]
fn test_ra_always_normalized() {
    for unit in [AngleUnit::Degrees, AngleUnit::Radians] {
        let turn = unit.full_turn();
        for frame in FRAMES {
            for (ra, dec) in grid() {
                let (ra, dec) = match unit {
                    AngleUnit::Degrees => (ra, dec),
                    AngleUnit::Radians => (ra.to_radians(), dec.to_radians()),
                };
                for e2 in [1850.0, 1900.0, 2100.0] {
                    let out = precess(EquatorialCoordinate::new(ra, dec), 2000.0, e2, frame, unit);
                    assert!(out.ra >= 0.0 && out.ra < turn, "ra = {}", out.ra);
                }
            }
        }
    }
}

#[test]
fn test_matrix_orthogonality() {
    for frame in FRAMES {
        for (e1, e2) in [(1950.0, 2000.0), (2000.0, 1750.0), (1900.0, 2250.0)] {
            let p = premat(e1, e2, frame);
            let product = p * p.transpose();
            for i in 0..3 {
                for j in 0..3 {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert_relative_eq!(product[(i, j)], expected, epsilon = 1e-12);
                }
            }
        }
    }
}

#[test]
fn test_polaris_from_sexagesimal() {
    let ra = parse_ra_to_deg("02 31 46.3").unwrap();
    let dec = parse_dec_to_deg("+89 15 50.6").unwrap();

    let out = precess(
        EquatorialCoordinate::new(ra, dec),
        2000.0,
        1985.0,
        PrecessionFrame::FK5,
        AngleUnit::Degrees,
    );

    // 2h 16m 22.73s, 89d 11' 47.3"
    assert_relative_eq!(out.ra, parse_ra_to_deg("02 16 22.73").unwrap(), epsilon = 1e-4);
    assert_relative_eq!(out.dec, parse_dec_to_deg("89 11 47.3").unwrap(), epsilon = 1e-5);
}

#[test]
fn test_eps_indi_batch_fk4() {
    let ra = [parse_ra_to_deg("21 59 33.053").unwrap()];
    let dec = [parse_dec_to_deg("-56 59 33.053").unwrap()];

    let (out_ra, out_dec) = precess_batch(
        &ra,
        &dec,
        1950.0,
        1975.0,
        PrecessionFrame::FK4,
        AngleUnit::Degrees,
    )
    .unwrap();

    assert_relative_eq!(out_ra[0], 330.31443054188657, epsilon = 1e-8);
    assert_relative_eq!(out_dec[0], -56.871861264878895, epsilon = 1e-8);
}
