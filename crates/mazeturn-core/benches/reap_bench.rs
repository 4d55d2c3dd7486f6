use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::UVec2;
use mazeturn_core::{
    BarrierWall, CellCoord, EntityId, EntityLifecycle, ExpiryCategory, MazeWalls,
    TimedEntityRegistry, WallDirection, WallGrid,
};

struct Scene {
    walls: WallGrid,
    removed: usize,
}

impl EntityLifecycle for Scene {
    fn deactivate(&mut self, _id: EntityId) {
        self.removed += 1;
    }

    fn destroy(&mut self, _id: EntityId) {
        self.removed += 1;
    }
}

impl MazeWalls for Scene {
    fn set_wall_internal_state(&mut self, cell: CellCoord, direction: WallDirection, present: bool) {
        self.walls.set_wall_internal_state(cell, direction, present);
    }
}

/// Fills a registry with `count` barriers spread over 16 expiry turns.
fn populated_registry(count: u64) -> TimedEntityRegistry {
    let mut registry = TimedEntityRegistry::new();
    for i in 0..count {
        let cell = UVec2::new((i % 32) as u32, ((i / 32) % 32) as u32);
        let wall = BarrierWall::new(cell, WallDirection::North);
        registry.schedule_barrier(i % 16 + 1, EntityId::new(i), wall, 0);
    }
    registry
}

fn bench_reap_nothing_due(c: &mut Criterion) {
    let registry = populated_registry(1_000);
    let mut scene = Scene {
        walls: WallGrid::new(32, 32),
        removed: 0,
    };

    c.bench_function("reap_nothing_due", |b| {
        b.iter(|| {
            let mut registry = registry.clone();
            black_box(registry.reap(ExpiryCategory::Barrier, black_box(0), &mut scene))
        })
    });
    black_box(scene.removed);
}

fn bench_reap_sixteenth_due(c: &mut Criterion) {
    let registry = populated_registry(1_000);
    let mut scene = Scene {
        walls: WallGrid::new(32, 32),
        removed: 0,
    };

    c.bench_function("reap_sixteenth_due", |b| {
        b.iter(|| {
            let mut registry = registry.clone();
            black_box(registry.reap(ExpiryCategory::Barrier, black_box(1), &mut scene))
        })
    });
    black_box(scene.removed);
}

criterion_group!(benches, bench_reap_nothing_due, bench_reap_sixteenth_due);
criterion_main!(benches);
