use std::{hint::black_box, sync::Arc};

use convoy_optimizer::{
    input::records::{LocationRecord, VehicleRecord},
    model::{routing_model::RoutingModel, time_dimension::TimeDimensionParams},
    problem::{
        location::LocationIdx,
        release_schedule::ReleaseSchedule,
        time_of_day::{Minutes, TimeOfDay},
        travel_time_matrix::TravelTimeMatrix,
        vehicle::VehicleIdx,
        vehicle_routing_problem::{VehicleRoutingProblem, VehicleRoutingProblemBuilder},
    },
    solver::{
        solver::Solver,
        solver_params::{SolverParams, Termination, Threads},
    },
};
use criterion::{Criterion, criterion_group, criterion_main};

const NUM_STOPS: usize = 40;

fn create_problem() -> VehicleRoutingProblem {
    let positions = (0..=NUM_STOPS)
        .map(|index| ((index * 37) % 41, (index * 17) % 29))
        .collect::<Vec<_>>();

    let travel_times = positions
        .iter()
        .map(|&(x1, y1)| {
            positions
                .iter()
                .map(|&(x2, y2)| (x1.abs_diff(x2) + y1.abs_diff(y2)) as Minutes)
                .collect()
        })
        .collect();

    let window = |open: Minutes, close: Minutes| {
        (TimeOfDay::from_minutes(open), TimeOfDay::from_minutes(close))
    };

    let locations = (0..=NUM_STOPS)
        .map(|index| {
            let (open, close) = if index == 0 {
                window(0, 1440)
            } else {
                window(480 + (index as Minutes % 4) * 30, 900)
            };
            LocationRecord {
                name: format!("L{index}"),
                address: format!("L{index}"),
                demand: if index == 0 { 0 } else { 1 + index as i64 % 5 },
                open,
                close,
                service_minutes: if index == 0 { 0 } else { 10 },
            }
        })
        .collect::<Vec<_>>();

    let vehicles = (0..6)
        .map(|index| VehicleRecord {
            id: format!("V{index}"),
            capacity: 40,
            loading_minutes: 15,
        })
        .collect::<Vec<_>>();

    let mut builder = VehicleRoutingProblemBuilder::default();
    builder
        .add_location_records(&locations)
        .add_vehicle_records(&vehicles)
        .set_travel_times(TravelTimeMatrix::try_new(travel_times).unwrap());
    builder.build().unwrap()
}

fn create_model() -> Arc<RoutingModel> {
    let problem = create_problem();
    let releases = ReleaseSchedule::for_problem(&problem, TimeOfDay::from_minutes(450));
    Arc::new(RoutingModel::new(
        Arc::new(problem),
        releases,
        &TimeDimensionParams::default(),
    ))
}

fn route_feasibility_benchmark(c: &mut Criterion) {
    let model = create_model();
    let stops = (1..=8).map(LocationIdx::new).collect::<Vec<_>>();
    let vehicle_id = VehicleIdx::new(0);

    c.bench_function("route feasibility (8 stops)", |b| {
        b.iter(|| model.is_route_feasible(black_box(vehicle_id), black_box(&stops)))
    });

    c.bench_function("route cumuls (8 stops)", |b| {
        b.iter(|| model.route_cumuls(black_box(vehicle_id), black_box(&stops)))
    });
}

fn solve_benchmark(c: &mut Criterion) {
    let model = create_model();

    let mut group = c.benchmark_group("solve");
    group.sample_size(10);
    for (name, threads) in [("single", Threads::Single), ("multi", Threads::Auto)] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let params = SolverParams {
                    terminations: vec![Termination::Iterations(200)],
                    search_threads: threads.clone(),
                    ..SolverParams::default()
                };
                Solver::new(Arc::clone(&model), params).solve().unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, route_feasibility_benchmark, solve_benchmark);
criterion_main!(benches);
