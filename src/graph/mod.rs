pub mod activity_dag;

pub use activity_dag::ActivityDag;
