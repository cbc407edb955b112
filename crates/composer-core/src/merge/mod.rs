//! Fragment mergers for composite artifacts
//!
//! Several generated artifacts receive contributions from more than one
//! source: the Prisma schema, the `.env` file, the `package.json` manifest,
//! and the global stylesheet. The text-based mergers here are deliberately
//! append-only: existing content is preserved byte-for-byte as a prefix and
//! fragments are concatenated after it. Nothing is parsed, deduplicated, or
//! validated; colliding Prisma model names or duplicate env vars surface
//! downstream. The manifest merger is the one structured merge, a
//! last-writer-wins overlay of dependency maps.

pub mod env;
pub mod manifest;
pub mod schema;
pub mod seo;
pub mod theme;
