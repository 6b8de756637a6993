use hexatile::Direction;

#[test]
fn iter() {
    let directions = Direction::iter().collect::<Vec<_>>();

    assert_eq!(directions.len(), 7);
    assert_eq!(directions[0], Direction::Center);
    assert_eq!(directions[6], Direction::IJ);
}

#[test]
fn try_from_u8() {
    assert_eq!(Direction::try_from(0), Ok(Direction::Center));
    assert_eq!(Direction::try_from(1), Ok(Direction::K));
    assert_eq!(Direction::try_from(6), Ok(Direction::IJ));
    assert!(Direction::try_from(7).is_err(), "7 is reserved as invalid");
}

#[test]
fn display() {
    // Directions display as their digit value.
    for direction in Direction::iter() {
        assert_eq!(direction.to_string(), u8::from(direction).to_string());
    }
}
