use emu_war::entities::*;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(Direction::Up, Direction::Up);
    assert_ne!(Direction::Left, Direction::Right);
    assert_eq!(ObstacleKind::Rock, ObstacleKind::Rock);
    assert_ne!(ObstacleKind::Rock, ObstacleKind::Bush);
    assert_eq!(RoundStatus::Active, RoundStatus::Active);
    assert_ne!(RoundStatus::Active, RoundStatus::Cleared);

    // Clone must produce an equal value
    let kind = ObstacleKind::Bush;
    assert_eq!(kind.clone(), ObstacleKind::Bush);
}

#[test]
fn round_state_clone_is_independent() {
    let original = RoundState {
        player: Player {
            x: 320.0,
            y: 200.0,
            facing: Direction::Up,
            speed: 4.0,
            is_moving: false,
        },
        emus: Vec::new(),
        bullets: Vec::new(),
        obstacles: Vec::new(),
        stage: Stage {
            width: 640.0,
            height: 360.0,
            hud_offset: 40.0,
        },
        emus_downed: 0,
        status: RoundStatus::Active,
        frame: 0,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99.0;
    cloned.emus_downed = 7;
    cloned.bullets.push(Bullet {
        x: 1.0,
        y: 2.0,
        dir: Direction::Down,
        speed: 10.0,
        active: true,
    });

    assert_eq!(original.player.x, 320.0);
    assert_eq!(original.emus_downed, 0);
    assert!(original.bullets.is_empty());
}
