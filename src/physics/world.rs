//! Thin wrapper around the rapier simulation state.
//!
//! Owns the body/collider sets and pipeline structures for one world and maps
//! authoring-side body configuration onto rapier builders. Collision
//! detection, integration and constraint solving all happen inside rapier;
//! nothing here second-guesses the solver.

use std::num::NonZeroUsize;

use glam::{Quat, Vec3};
use rapier3d::na::{Isometry3, Translation3};
use rapier3d::prelude::*;
use tracing::warn;

use crate::config::SimulationSettings;
use crate::physics::{BodyKind, PhysicsBody, Shape};
use crate::utils::math::{from_na_quat, from_na_vector, to_na_point, to_na_quat, to_na_vector};

pub struct PhysicsWorld {
    gravity: Vector<f32>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl PhysicsWorld {
    pub fn new(settings: &SimulationSettings) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = settings.timestep;
        integration_parameters.max_ccd_substeps = settings.solver.max_ccd_substeps;
        if let Some(iterations) = NonZeroUsize::new(settings.solver.num_solver_iterations) {
            integration_parameters.num_solver_iterations = iterations;
        }

        Self {
            gravity: Vector::new(
                settings.gravity[0],
                settings.gravity[1],
                settings.gravity[2],
            ),
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    /// Create the rapier body for `body`, seeded at the given pose, and attach
    /// one collider per configured shape.
    pub fn register_body(
        &mut self,
        body: &PhysicsBody,
        position: Vec3,
        rotation: Quat,
    ) -> RigidBodyHandle {
        let builder = match body.body_kind {
            BodyKind::Static => RigidBodyBuilder::fixed(),
            BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
            BodyKind::Kinematic => RigidBodyBuilder::kinematic_position_based(),
        };

        let mut builder = builder
            .position(Isometry3::from_parts(
                Translation3::from(to_na_vector(position)),
                to_na_quat(rotation),
            ))
            .linear_damping(body.linear_damping)
            .angular_damping(body.angular_damping)
            .can_sleep(body.allow_sleep);
        if body.fixed_rotation {
            builder = builder.lock_rotations();
        }

        let handle = self.bodies.insert(builder);
        for shape in &body.shapes {
            self.attach_shape(
                handle,
                shape,
                body.collision_filter_group,
                body.collision_filter_mask,
            );
        }

        // Colliders derive mass from volume; adjust so the configured mass wins.
        if body.body_kind == BodyKind::Dynamic {
            if let Some(rb) = self.bodies.get_mut(handle) {
                let collider_mass = rb.mass();
                rb.set_additional_mass(body.mass - collider_mass, true);
            }
        }

        handle
    }

    /// Attach one collider for `shape` to an already-registered body.
    ///
    /// A degenerate convex hull (fewer than four non-coplanar vertices) is
    /// skipped with a warning; the body stays registered.
    pub fn attach_shape(&mut self, handle: RigidBodyHandle, shape: &Shape, group: u32, mask: u32) {
        let builder = match shape {
            Shape::Sphere { radius } => ColliderBuilder::ball(*radius),
            Shape::Box { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
            Shape::ConvexPolyhedron { vertices, .. } => {
                let points: Vec<_> = vertices.iter().map(|v| to_na_point(*v)).collect();
                match ColliderBuilder::convex_hull(&points) {
                    Some(builder) => builder,
                    None => {
                        warn!(
                            "Skipping degenerate convex hull ({} vertices)",
                            points.len()
                        );
                        return;
                    }
                }
            }
        };

        let collider = builder
            .collision_groups(InteractionGroups::new(
                Group::from_bits_truncate(group),
                Group::from_bits_truncate(mask),
            ))
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
    }

    /// De-register a body and its attached colliders.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    /// Simulated pose of a registered body.
    pub fn body_pose(&self, handle: RigidBodyHandle) -> Option<(Vec3, Quat)> {
        let body = self.bodies.get(handle)?;
        Some((
            from_na_vector(body.translation()),
            from_na_quat(body.rotation()),
        ))
    }

    /// Overwrite a registered body's pose (kinematic driving, editor gizmos).
    pub fn set_body_pose(&mut self, handle: RigidBodyHandle, position: Vec3, rotation: Quat) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_position(
                Isometry3::from_parts(
                    Translation3::from(to_na_vector(position)),
                    to_na_quat(rotation),
                ),
                true,
            );
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(&SimulationSettings::default())
    }
}
