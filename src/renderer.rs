use tile_caster::{RayHit, SpriteKind, World};

use crate::camera::Camera;

#[inline]
fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    // BGRA8 in little-endian memory
    (b as u32) | ((g as u32) << 8) | ((r as u32) << 16)
    // Alpha at 0
}

#[inline]
fn darken(c: u32) -> u32 {
    (c >> 1) & 0x007F7F7F
}

const WALL_COLORS: [u32; 4] = [
    0x00C8C8C8, // 200,200,200
    0x00B4B4FA, // 180,180,250
    0x00FAB4B4, // 250,180,180
    0x00B4FAB4, // 180,250,180
];

/// Flat color standing in for a texture lookup: wall id picks the base color,
/// every other 8-texel band of `texture_x` is shaded and y-sided faces are
/// darker.
fn wall_color(hit: &RayHit) -> u32 {
    let mut c = WALL_COLORS[hit.hit_id as usize % WALL_COLORS.len()];
    if (hit.texture_x / 8) % 2 == 1 {
        c = (c & 0x00F0F0F0) - 0x00101010;
    }
    if !hit.x_sided {
        c = darken(c);
    }
    c
}

fn sprite_color(image: u32, kind: SpriteKind) -> u32 {
    match kind {
        SpriteKind::Projectile => pack_rgb(255, 220, 60),
        SpriteKind::Object => WALL_COLORS[image as usize % WALL_COLORS.len()] & 0x0000FFFF,
    }
}

pub fn render_frame(buf: &mut [u32], width: usize, height: usize, world: &World) {
    // Clear background
    let sky = pack_rgb(30, 30, 70);
    let ground = pack_rgb(40, 40, 40);

    let mid = height / 2;
    buf[..mid * width].fill(sky);
    buf[mid * width..width * height].fill(ground);

    let camera = Camera::new(&world.player);
    let screen_h = height as f32;
    let cy0 = camera.screen_center_y(screen_h);

    // Walls, one raycast per column
    let hits = world.cast_columns(width);
    let mut depth: Vec<f32> = vec![f32::INFINITY; width];
    for (x, hit) in hits.iter().enumerate() {
        if !hit.is_hit() {
            continue;
        }
        depth[x] = hit.wall_distance;

        let half = 0.5 * camera.slice_height(hit.wall_distance, screen_h);
        let y0 = ((cy0 - half).floor() as i32).max(0);
        let y1 = ((cy0 + half).floor() as i32).min(height as i32 - 1);
        if y0 > y1 {
            continue;
        }

        let color = wall_color(hit);
        let mut idx = (y0 as usize) * width + x;
        for _y in y0..=y1 {
            buf[idx] = color;
            idx += width;
        }
    }

    // Sprites, farthest first, clipped against wall depth
    for i in world.sprites_by_distance() {
        let Some(sprite) = world.sprites.at(i) else {
            continue;
        };
        let c = camera.world_to_camera(sprite.position);
        if c.y <= 0.1 {
            continue; // behind the camera
        }

        let scale = match sprite.kind {
            SpriteKind::Projectile => 0.2,
            SpriteKind::Object => 0.6,
        };
        let size = camera.slice_height(c.y, screen_h) * scale;
        let sx = camera.project_x(c.x, c.y, width as f32);

        let x0 = ((sx - 0.5 * size).floor() as i32).max(0);
        let x1 = ((sx + 0.5 * size).floor() as i32).min(width as i32 - 1);
        // Sit on the floor
        let bottom = cy0 + 0.5 * camera.slice_height(c.y, screen_h);
        let y0 = ((bottom - size).floor() as i32).max(0);
        let y1 = (bottom.floor() as i32).min(height as i32 - 1);
        if x0 > x1 || y0 > y1 {
            continue;
        }

        let color = sprite_color(sprite.image, sprite.kind);
        for x in x0 as usize..=x1 as usize {
            if c.y >= depth[x] {
                continue;
            }
            for y in y0 as usize..=y1 as usize {
                buf[y * width + x] = color;
            }
        }
    }
}
