//////////////////////////////////////////////////////////////////////
// use error chain so we can use Result<> everywhere
// for error handling
//
// the initialization failures are caller-fatal for a given set of
// generators and offset: pick other angles/offset and retry

error_chain! {

    foreign_links {
        Fmt(::std::fmt::Error);
        Io(::std::io::Error);
        Cairo(::cairo::Error) #[cfg(feature = "render")];
    }

    errors {

        InvalidDimension(dims: usize) {
            description("unsupported dimension count")
            display("dimension count {} is outside of {}..={}",
                    dims, crate::geometry::MIN_DIM, crate::geometry::MAX_DIM)
        }

        InvalidOffset(len: usize, dims: usize) {
            description("relative offset has the wrong length")
            display("relative offset has {} components, expected {}", len, dims)
        }

        DegenerateBasis(row: usize) {
            description("generators are not linearly independent")
            display("generator row {} vanishes after orthogonalization", row)
        }

        NonGenericPlane(direction: usize) {
            description("tiling plane contains or is perpendicular to a lattice direction")
            display("lattice direction {} lies in or is perpendicular to the tiling plane",
                    direction)
        }

        SingularFace(a: usize, b: usize, c: usize) {
            description("a face of the cylinder projects to nothing")
            display("cylinder face spanned by directions ({}, {}, {}) is singular", a, b, c)
        }

        SingularParametrization {
            description("the primary directions do not parametrize the plane")
            display("primary directions give a singular parametrization")
        }

        WorkerPanicked {
            description("generation worker panicked")
            display("generation worker panicked")
        }

    }

}
