use approx::assert_relative_eq;
use nalgebra::Vector2;

use crate::config::{FieldConstants, SpringTopology};
use crate::forces::{ElasticField, ElasticTuning, ForceModel, ForceOutput};
use crate::planet::{Planet, PlanetState};

fn field(topology: SpringTopology, friction: f64) -> ElasticField {
    ElasticField::new(FieldConstants {
        elastic: 2.0,
        resting_distance: 1.0,
        friction,
        topology,
    })
}

fn states_of(planets: &[Planet]) -> Vec<PlanetState> {
    planets.iter().map(Planet::initial_state).collect()
}

#[test]
fn test_field_reports_forces() {
    assert_eq!(field(SpringTopology::Chain, 0.0).output(), ForceOutput::Force);
}

#[test]
fn test_field_force_is_not_divided_by_mass() {
    let model = field(SpringTopology::Chain, 0.0);
    let planets = [
        Planet::new(0.0, 0.0).with_mass(4.0),
        Planet::new(2.0, 0.0).with_mass(0.5),
    ];
    let mut out = vec![Vector2::zeros(); 2];
    model.accumulate(&planets, &states_of(&planets), &mut out);

    assert_relative_eq!(out[0], Vector2::new(2.0, 0.0));
    assert_relative_eq!(out[1], Vector2::new(-2.0, 0.0));
    assert_relative_eq!(ForceOutput::Force.to_acceleration(out[0], 4.0), Vector2::new(0.5, 0.0));
}

#[test]
fn test_field_friction_is_left_to_integrator() {
    let model = field(SpringTopology::Chain, 3.0);
    let planets = [
        Planet::new(0.0, 0.0).with_velocity(1.0, 1.0),
        Planet::new(1.0, 0.0),
    ];
    let mut out = vec![Vector2::zeros(); 2];
    model.accumulate(&planets, &states_of(&planets), &mut out);

    assert_relative_eq!(out[0], Vector2::zeros());
    assert_eq!(model.drag(), 3.0);
}

#[test]
fn test_field_topology_selects_springs() {
    let planets = [Planet::new(0.0, 0.0), Planet::new(1.0, 0.0), Planet::new(2.0, 0.0)];
    let states = states_of(&planets);

    let chain = field(SpringTopology::Chain, 0.0);
    let mesh = field(SpringTopology::Mesh, 0.0);

    assert_relative_eq!(chain.potential_energy(&planets, &states), 0.0);
    // only the 0-2 spring is stretched, by 1
    assert_relative_eq!(mesh.potential_energy(&planets, &states), 1.0);
    assert_eq!(mesh.topology(), SpringTopology::Mesh);
}

#[test]
fn test_field_tuning_round_trips_constants() {
    let mut model = field(SpringTopology::Mesh, 0.0);
    model.set_friction(0.2);
    model.set_elastic_constant(9.0);

    let constants = model.constants();
    assert_eq!(constants.friction, 0.2);
    assert_eq!(constants.elastic, 9.0);
    assert_eq!(constants.topology, SpringTopology::Mesh);
}
