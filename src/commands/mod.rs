// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod periods;
pub mod items;
pub mod transactions;
pub mod templates;
pub mod exporter;
pub mod importer;
pub mod config;
