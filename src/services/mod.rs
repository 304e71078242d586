// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

pub mod analyzer;
pub mod composer;
pub mod extractor;
pub mod reporter;
pub mod safety;
