use hexatile::Resolution;

#[test]
fn try_from_u8() {
    assert_eq!(Resolution::try_from(0), Ok(Resolution::Zero));
    assert_eq!(Resolution::try_from(15), Ok(Resolution::Fifteen));
    assert!(Resolution::try_from(16).is_err());
}

#[test]
fn from_str() {
    assert_eq!("11".parse::<Resolution>(), Ok(Resolution::Eleven));
    assert!("16".parse::<Resolution>().is_err());
    assert!("nope".parse::<Resolution>().is_err());
}

#[test]
fn succ_pred() {
    assert_eq!(Resolution::Eleven.succ(), Some(Resolution::Twelve));
    assert_eq!(Resolution::Fifteen.succ(), None);
    assert_eq!(Resolution::Eleven.pred(), Some(Resolution::Ten));
    assert_eq!(Resolution::Zero.pred(), None);
}

#[test]
fn is_class3() {
    assert!(Resolution::Eleven.is_class3());
    assert!(!Resolution::Two.is_class3());
}

#[test]
fn range() {
    let resolutions =
        Resolution::range(Resolution::Five, Resolution::Seven)
            .collect::<Vec<_>>();
    assert_eq!(
        resolutions,
        vec![Resolution::Five, Resolution::Six, Resolution::Seven]
    );

    // Wrong way around: empty (use `rev`).
    assert_eq!(
        Resolution::range(Resolution::Two, Resolution::Zero).count(),
        0
    );
}

#[test]
fn published_stats() {
    // Exact published values at both ends of the range.
    assert_eq!(Resolution::Zero.cell_count(), 122);
    assert_eq!(Resolution::Fifteen.cell_count(), 569_707_381_193_162);
    assert_eq!(Resolution::pentagon_count(), 12);

    // Areas and edge lengths shrink as the resolution grows.
    for resolution in Resolution::range(Resolution::One, Resolution::Fifteen)
    {
        let coarser = resolution.pred().expect("coarser resolution");

        assert!(
            resolution.area_km2() < coarser.area_km2(),
            "areas shrink at {resolution}"
        );
        assert!(
            resolution.edge_length_km() < coarser.edge_length_km(),
            "edges shrink at {resolution}"
        );
        assert!(
            resolution.cell_count() > coarser.cell_count(),
            "cell count grows at {resolution}"
        );
    }

    // Unit conversions are consistent.
    for resolution in Resolution::range(Resolution::Zero, Resolution::Fifteen)
    {
        assert!(
            (resolution.area_m2() / resolution.area_km2() - 1e6).abs()
                / 1e6
                < 1e-9,
            "area units at {resolution}"
        );
        assert!(
            (resolution.edge_length_m() / resolution.edge_length_km() - 1e3)
                .abs()
                / 1e3
                < 1e-6,
            "length units at {resolution}"
        );
    }
}

#[test]
fn pentagons() {
    for resolution in Resolution::range(Resolution::Zero, Resolution::Three) {
        let pentagons = resolution.pentagons().collect::<Vec<_>>();

        assert_eq!(pentagons.len(), 12, "12 pentagons at {resolution}");
        for pentagon in pentagons {
            assert!(pentagon.is_pentagon(), "{pentagon} is a pentagon");
            assert_eq!(
                pentagon.resolution(),
                resolution,
                "pentagon resolution"
            );
        }
    }
}
