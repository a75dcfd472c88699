// Copyright 2026 the Teksto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

mod test_editor;
mod utils;
