pub mod building;
pub mod intersection;
pub mod lane;
pub mod marking;
pub mod road;
pub mod tree;
