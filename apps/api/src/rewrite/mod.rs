// AI rewrite flows: section rewrites, full-resume rewrites and the brutal review.
// All generation happens in the backend; brutal review markup is pre-rendered here.

pub mod handlers;
