extern crate nalgebra as na;
use na::Vector3;

/// Von Mises equivalent stress from three principal stresses.
pub fn von_mises(s1: f64, s2: f64, s3: f64) -> f64 {
    (((s1 - s2).powi(2) + (s2 - s3).powi(2) + (s3 - s1).powi(2)) / 2.0).sqrt()
}

/// Principal stress state (hoop, axial, radial) at one surface of a
/// thick-walled cylinder under simultaneous internal and external pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceStress {
    principal: Vector3<f64>,
}

impl SurfaceStress {
    /// Lamé solution at the inner surface.
    pub fn at_inner_surface(p_ext: f64, p_int: f64, od: f64, id: f64) -> Self {
        let (od2, id2) = (od * od, id * id);
        let hoop = p_int * (od2 + id2) / (od2 - id2) - 2.0 * p_ext * od2 / (od2 - id2);
        let axial = p_int * id2 / (od2 - id2) - p_ext * od2 / (od2 - id2);
        let radial = -p_int;
        SurfaceStress {
            principal: Vector3::new(hoop, axial, radial),
        }
    }

    /// Lamé solution at the outer surface. The axial term matches the inner
    /// surface: with closed ends it is uniform through the wall.
    pub fn at_outer_surface(p_ext: f64, p_int: f64, od: f64, id: f64) -> Self {
        let (od2, id2) = (od * od, id * id);
        let hoop = 2.0 * p_int * id2 / (od2 - id2) - p_ext * (od2 + id2) / (od2 - id2);
        let axial = p_int * id2 / (od2 - id2) - p_ext * od2 / (od2 - id2);
        let radial = -p_ext;
        SurfaceStress {
            principal: Vector3::new(hoop, axial, radial),
        }
    }

    pub fn hoop(&self) -> f64 {
        self.principal.x
    }

    pub fn axial(&self) -> f64 {
        self.principal.y
    }

    pub fn radial(&self) -> f64 {
        self.principal.z
    }

    pub fn von_mises(&self) -> f64 {
        von_mises(self.principal.x, self.principal.y, self.principal.z)
    }
}
