use tile_caster::{GridMap, Player, SimConfig, Sprite, SpriteKind, Vector, World};

fn room(player: Player, config: SimConfig) -> World {
    World::new(GridMap::bordered(7, 7, 1).expect("grid"), player, config)
}

fn unit_speed() -> SimConfig {
    SimConfig {
        move_speed: 1.0,
        ..SimConfig::default()
    }
}

#[test]
fn diagonal_move_slides_along_wall() {
    let mut grid = GridMap::bordered(7, 7, 1).expect("grid");
    grid.set_wall(5, 2, 3);
    grid.set_wall(5, 3, 3);
    let player = Player::new(Vector::new(4.95, 2.5), Vector::new(1.0, 1.0), 0.66);
    let mut w = World::new(grid, player, unit_speed());

    w.player.move_dir = Vector::new(0.0, -1.0);
    w.update(0.1);

    let step = 0.1 * std::f32::consts::FRAC_1_SQRT_2;
    assert_eq!(w.player.position.x, 4.95);
    assert!((w.player.position.y - (2.5 + step)).abs() < 1e-5);
}

#[test]
fn walking_into_border_never_enters_it() {
    let player = Player::new(Vector::new(1.5, 3.5), Vector::new(-1.0, 0.0), 0.66);
    let mut w = room(player, SimConfig::default());
    for _ in 0..50 {
        w.player.move_dir = Vector::new(0.0, -1.0);
        w.update(0.1);
        assert!(!w.grid.hits_wall(w.player.position));
    }
    assert!(w.player.position.x > 1.0);
}

#[test]
fn sprite_blocks_player() {
    let player = Player::new(Vector::new(2.5, 2.5), Vector::new(0.0, -1.0), 0.66);
    let mut w = room(player, unit_speed());
    w.sprites.create(Sprite::object(Vector::new(2.5, 2.2), 3));

    w.player.move_dir = Vector::new(0.0, -1.0);
    w.update(0.15);
    assert_eq!(w.player.position, Vector::new(2.5, 2.5));

    // Strafing past it is still allowed.
    w.player.move_dir = Vector::new(1.0, 0.0);
    w.update(0.15);
    assert!(w.player.position.x > 2.5);
}

#[test]
fn projectile_removed_on_wall_contact() {
    let player = Player::new(Vector::new(3.5, 3.5), Vector::new(1.0, 0.0), 0.66);
    let mut w = room(player, SimConfig::default());

    w.shoot();
    assert_eq!(w.sprites.count(), 1);
    let shot = *w.sprites.at(0).expect("projectile");
    assert_eq!(shot.kind, SpriteKind::Projectile);
    assert!((shot.position - Vector::new(3.8, 3.5)).length() < 1e-6);

    w.update(0.1);
    w.update(0.1);
    assert_eq!(w.sprites.count(), 1);
    w.update(0.1);
    assert_eq!(w.sprites.count(), 0);
}

#[test]
fn projectile_motion_scales_with_delta() {
    let player = Player::new(Vector::new(1.5, 3.5), Vector::new(1.0, 0.0), 0.66);
    let mut coarse = room(player, SimConfig::default());
    let mut fine = coarse.clone();
    coarse.shoot();
    fine.shoot();

    coarse.update(0.1);
    fine.update(0.05);
    fine.update(0.05);

    let a = coarse.sprites.at(0).expect("coarse").position;
    let b = fine.sprites.at(0).expect("fine").position;
    assert!((a - b).length() < 1e-5);
}

#[test]
fn expired_projectiles_removed_in_one_frame_keeping_order() {
    let player = Player::new(Vector::new(3.5, 3.5), Vector::new(0.0, -1.0), 0.66);
    let mut w = room(player, SimConfig::default());
    w.sprites.create(Sprite::object(Vector::new(2.5, 4.5), 7));
    w.sprites.create(Sprite::projectile(Vector::new(5.9, 2.5), Vector::new(5.0, 0.0), 1));
    w.sprites.create(Sprite::projectile(Vector::new(3.0, 5.0), Vector::new(0.0, -1.0), 2));
    w.sprites.create(Sprite::projectile(Vector::new(1.1, 4.5), Vector::new(-5.0, 0.0), 3));

    w.update(0.1);

    let images: Vec<u32> = w.sprites.iter().map(|s| s.image).collect();
    assert_eq!(images, vec![7, 2]);
}

#[test]
fn sprite_rollback_never_pushes_player_into_wall() {
    let mut grid = GridMap::bordered(7, 7, 5).expect("grid");
    grid.set_wall(2, 3, 5);
    let player = Player::new(Vector::new(2.95, 2.95), Vector::new(1.0, 1.0), 0.66);
    let mut w = World::new(grid, player, unit_speed());
    w.sprites.create(Sprite::object(Vector::new(3.2, 2.95), 3));

    w.player.move_dir = Vector::new(0.0, -1.0);
    w.update(0.1);

    assert!(!w.grid.hits_wall(w.player.position));
    assert_eq!(w.player.position, Vector::new(2.95, 2.95));
    assert!(w.cast(w.player.direction).wall_distance > 0.0);
}
