// GitHub portfolio analysis: ranks a user's repositories against a target role.
// Ranking runs in the backend; this layer validates and forwards.

pub mod handlers;
