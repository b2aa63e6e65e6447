use catch_the_object::compute::init_state;
use catch_the_object::entities::*;

#[test]
fn kind_table_weights_sum_to_one_hundred() {
    let total: u32 = ObjectKind::ALL.iter().map(|k| k.info().weight).sum();
    assert_eq!(total, 100);
    assert_eq!(ObjectKind::Normal.info().weight, 50);
    assert_eq!(ObjectKind::Hazard.info().weight, 17);
}

#[test]
fn only_the_bomb_is_bad() {
    let bad: Vec<ObjectKind> = ObjectKind::ALL
        .iter()
        .copied()
        .filter(|k| !k.is_good())
        .collect();
    assert_eq!(bad, vec![ObjectKind::Hazard]);
    assert!(ObjectKind::Life.info().grants_life);
    assert!(ObjectKind::Widen.info().grants_widen);
}

#[test]
fn rect_overlap_is_strict() {
    let a = Rect { x: 0.0, y: 0.0, w: 10.0, h: 10.0 };
    assert!(a.overlaps(&Rect { x: 9.0, y: 9.0, w: 10.0, h: 10.0 }));
    assert!(!a.overlaps(&Rect { x: 10.0, y: 0.0, w: 10.0, h: 10.0 }));
    assert!(!a.overlaps(&Rect { x: 0.0, y: 10.0, w: 10.0, h: 10.0 }));
    assert!(!a.overlaps(&Rect { x: -20.0, y: 0.0, w: 10.0, h: 10.0 }));
}

#[test]
fn level_and_multiplier_are_derived() {
    let mut s = init_state(800.0, 600.0, 0);
    s.score = 59;
    s.combo = 7;
    assert_eq!(s.level(), 2);
    assert_eq!(s.multiplier(), 3);
}

#[test]
fn particle_life_fraction() {
    let p = Particle {
        x: 0.0,
        y: 0.0,
        vx: 0.0,
        vy: 0.0,
        color: Rgb(1, 2, 3),
        radius: 4.0,
        life: 10,
        max_life: 40,
    };
    assert_eq!(p.life_fraction(), 0.25);
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(800.0, 600.0, 0);
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.basket.x = 99.0;
    cloned.score = 999;
    cloned.objects.push(FallingObject { x: 5.0, y: 5.0, kind: ObjectKind::Normal, speed: 5.0 });

    assert_eq!(original.basket.x, 350.0);
    assert_eq!(original.score, 0);
    assert!(original.objects.is_empty());
}
