//! Static showroom backdrop: a floor, three walls and a ceiling.
//!
//! The backdrop is built once and never changes afterwards.

use std::{f32::consts::FRAC_PI_2, rc::Rc};

use cgmath::{Quaternion, Rad, Rotation3, Vector3};

use crate::{
    data_structures::{
        drawable::{GeometryBackend, Group},
        instance::Instance,
        material::MaterialParams,
    },
    error::ResourceError,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PieceShape {
    Box(Vector3<f32>),
    Plane { width: f32, height: f32 },
}

/// Which of the two showroom materials a piece uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finish {
    Wall,
    Floor,
}

impl Finish {
    pub fn params(self) -> MaterialParams {
        match self {
            Finish::Wall => MaterialParams::from_hex(0xeeeeee, 0.9, 0.0),
            Finish::Floor => MaterialParams::from_hex(0x444444, 0.8, 0.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PieceSpec {
    pub name: &'static str,
    pub shape: PieceShape,
    pub transform: Instance,
    pub finish: Finish,
}

fn placed(position: [f32; 3], rotation: Quaternion<f32>) -> Instance {
    Instance {
        position: position.into(),
        rotation,
        ..Default::default()
    }
}

/// Layout of the showroom. Planes face +z before their rotation is applied.
pub fn showroom_pieces() -> Vec<PieceSpec> {
    let upright = Quaternion::from_angle_x(Rad(0.0));
    vec![
        PieceSpec {
            name: "floor",
            shape: PieceShape::Plane {
                width: 20.0,
                height: 20.0,
            },
            transform: placed([0.0, -1.0, 0.0], Quaternion::from_angle_x(Rad(-FRAC_PI_2))),
            finish: Finish::Floor,
        },
        PieceSpec {
            name: "back wall",
            shape: PieceShape::Box(Vector3::new(20.0, 10.0, 0.5)),
            transform: placed([0.0, 4.0, -5.0], upright),
            finish: Finish::Wall,
        },
        PieceSpec {
            name: "left side wall",
            shape: PieceShape::Box(Vector3::new(0.5, 10.0, 4.0)),
            transform: placed([-5.0, 4.0, -3.0], upright),
            finish: Finish::Wall,
        },
        PieceSpec {
            name: "right side wall",
            shape: PieceShape::Box(Vector3::new(0.5, 10.0, 12.0)),
            transform: placed([-5.0, 4.0, 9.0], upright),
            finish: Finish::Wall,
        },
        PieceSpec {
            name: "ceiling",
            shape: PieceShape::Plane {
                width: 20.0,
                height: 20.0,
            },
            transform: placed([0.0, 9.0, 0.0], Quaternion::from_angle_x(Rad(FRAC_PI_2))),
            finish: Finish::Wall,
        },
    ]
}

pub struct Piece<B: GeometryBackend> {
    pub name: &'static str,
    pub geometry: B::Geometry,
    pub material: Rc<B::Material>,
    pub transform: Instance,
}

pub struct Showroom<B: GeometryBackend> {
    group: Group<Vec<Piece<B>>>,
}

impl<B: GeometryBackend> Showroom<B> {
    pub fn new(
        backend: &mut B,
        wall: Rc<B::Material>,
        floor: Rc<B::Material>,
    ) -> Result<Self, ResourceError> {
        let mut pieces = Vec::new();
        for spec in showroom_pieces() {
            let geometry = match spec.shape {
                PieceShape::Box(extent) => backend.allocate_box(spec.name, extent),
                PieceShape::Plane { width, height } => {
                    backend.allocate_plane(spec.name, width, height)
                }
            };
            let geometry = match geometry {
                Ok(geometry) => geometry,
                Err(e) => {
                    Self::release_all(backend, pieces);
                    return Err(e);
                }
            };
            let material = match spec.finish {
                Finish::Wall => Rc::clone(&wall),
                Finish::Floor => Rc::clone(&floor),
            };
            pieces.push(Piece {
                name: spec.name,
                geometry,
                material,
                transform: spec.transform,
            });
        }
        let showroom = Self {
            group: Group::new(pieces),
        };
        let uploaded = showroom.pieces().iter().try_for_each(|piece| {
            backend.upload_transform(&piece.geometry, &(&showroom.group.transform * &piece.transform))
        });
        if let Err(e) = uploaded {
            showroom.dispose(backend);
            return Err(e);
        }
        Ok(showroom)
    }

    pub fn pieces(&self) -> &[Piece<B>] {
        self.group.members()
    }

    pub fn dispose(self, backend: &mut B) {
        Self::release_all(backend, self.group.into_members());
    }

    fn release_all(backend: &mut B, pieces: Vec<Piece<B>>) {
        for piece in pieces {
            if let Err(e) = backend.release(piece.name, piece.geometry) {
                log::error!("{}", e);
            }
        }
    }
}
