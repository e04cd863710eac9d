// Resume analysis: forwards uploads to the backend and maps its raw feature/score
// payload into the report shape the UI renders.

pub mod handlers;
pub mod mapping;
