use comfy_table::{Table, presets::UTF8_FULL};
use convoy_optimizer::{
    dispatch::{DispatchOutcome, DispatchResult},
    plan::route_plan::RoutePlan,
};
use tracing::warn;

pub fn routes_table(plan: &RoutePlan) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Vehicle",
        "Stops",
        "Load",
        "Departure",
        "Return",
        "Total time (min)",
    ]);

    for route in plan.routes() {
        table.add_row(vec![
            route.vehicle_id.clone(),
            route.stops.to_string(),
            format!("{}/{}", route.total_load, route.capacity),
            route.departure_time.to_string(),
            route.return_time.to_string(),
            route.total_time.to_string(),
        ]);
    }

    table
}

pub fn print(result: &DispatchResult) {
    match &result.outcome {
        DispatchOutcome::Planned { assignment, plan } => {
            println!("{}", routes_table(plan));
            println!("Total travel time: {} min", assignment.objective());
            if !plan.not_required().is_empty() {
                println!("Not required: {}", plan.not_required().join(", "));
            }
        }
        DispatchOutcome::Infeasible { infeasibility } => {
            warn!("No solution found: {infeasibility}");
        }
    }
}

#[cfg(test)]
mod tests {
    use convoy_optimizer::{
        config::DispatchConfig,
        dispatch::dispatch_with_params,
        input::records::{LocationRecord, VehicleRecord},
        problem::{
            time_of_day::TimeOfDay, travel_time_matrix::TravelTimeMatrix,
            vehicle_routing_problem::VehicleRoutingProblemBuilder,
        },
        solver::solver_params::{SolverParams, Termination},
    };

    use super::*;
    use crate::sheets;

    fn plan() -> RoutePlan {
        let location = |name: &str, demand, open, close, service| LocationRecord {
            name: name.to_owned(),
            address: name.to_owned(),
            demand,
            open: TimeOfDay::from_minutes(open),
            close: TimeOfDay::from_minutes(close),
            service_minutes: service,
        };
        let vehicle = |id: &str| VehicleRecord {
            id: id.to_owned(),
            capacity: 10,
            loading_minutes: 20,
        };

        let mut builder = VehicleRoutingProblemBuilder::default();
        builder
            .add_location_records(&[
                location("Depot", 0, 0, 1440, 0),
                location("A", 6, 480, 720, 10),
                location("B", 6, 480, 720, 10),
            ])
            .add_vehicle_records(&[vehicle("T1"), vehicle("T2"), vehicle("T3")])
            .set_travel_times(
                TravelTimeMatrix::try_new(vec![vec![0, 20, 25], vec![20, 0, 10], vec![25, 10, 0]])
                    .unwrap(),
            );

        let result = dispatch_with_params(
            builder.build().unwrap(),
            &DispatchConfig::default(),
            SolverParams {
                terminations: vec![Termination::Iterations(50)],
                ..SolverParams::default()
            },
        )
        .unwrap();

        result.outcome.plan().unwrap().clone()
    }

    #[test]
    fn test_routes_table() {
        let plan = plan();
        let rendered = routes_table(&plan).to_string();

        assert!(rendered.contains("T1"));
        assert!(rendered.contains("T2"));
        assert!(!rendered.contains("T3"));
        assert_eq!(plan.not_required(), ["T3".to_owned()]);
    }

    #[test]
    fn test_write_plan() {
        let plan = plan();
        let mut buffer = Vec::new();
        sheets::write_plan(&mut buffer, &plan).unwrap();

        let content = String::from_utf8(buffer).unwrap();
        let lines = content.lines().collect::<Vec<_>>();

        assert_eq!(
            lines[0],
            "vehicle_id,sequence,location_name,load_start_time,arrival_time,departure_time,cumulative_load"
        );
        // 2 vehicles of 3 visits each plus one separator
        assert_eq!(lines.len(), 1 + 3 + 1 + 3);
        assert_eq!(lines[4], ",,,,,,");
        assert!(lines[1].starts_with("T1,0,Depot,07:30,,07:50,0"));
    }
}
