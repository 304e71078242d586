// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

mod features;
mod findings;
mod media;
mod score;

pub use features::*;
pub use findings::*;
pub use media::*;
pub use score::*;
