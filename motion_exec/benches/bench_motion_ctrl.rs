//! # Motion Control Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use comms_if::tc::TrajOrder;
use motion_lib::{
    loc::Pose,
    motion_ctrl::{MotionCtrl, Params},
    sim::{self, SimRobot},
    traj_ctrl::TrajCtrl,
};

fn motion_ctrl_benchmark(c: &mut Criterion) {
    // ---- Build a motion control running every sub-schedule on each tick ----

    let params = Params {
        base_period_ms: 5,
        obstacle_period_ms: 5,
        traj_period_ms: 5,
        servo_period_ms: 5,
        enable_on_start: true,
        safeguard_on_start: true,
    };

    let mut robot = SimRobot::new(sim::Params::default(), Pose::default());
    robot.add_obstacle(5.0, 5.0);

    let mut mc = MotionCtrl::new(params, TrajCtrl::default(), robot).unwrap();

    // A full path, re-submitted whenever the queue runs dry
    let path = TrajOrder::FollowPath {
        points_m: vec![
            [0.5, 0.0],
            [1.0, 0.2],
            [1.5, 0.0],
            [2.0, 0.5],
            [2.0, 1.0],
            [1.5, 1.5],
            [1.0, 1.2],
            [0.5, 1.5],
            [0.0, 1.0],
            [0.0, 0.0],
        ],
    };

    c.bench_function("MotionCtrl::tick::follow_path", |b| {
        b.iter(|| {
            if mc.queue_len() == 0 {
                mc.submit(path.clone()).unwrap();
            }
            black_box(mc.tick(0.005))
        })
    });

    // Issue alone, without any motion
    let mut traj_ctrl = TrajCtrl::default();
    let odom = SimRobot::new(sim::Params::default(), Pose::new(0.3, 0.4, 3.0, 1.0));

    c.bench_function("TrajCtrl::issue::follow_path", |b| {
        b.iter(|| traj_ctrl.issue(black_box(path.clone()), &odom).unwrap())
    });
}

criterion_group!(benches, motion_ctrl_benchmark);
criterion_main!(benches);
