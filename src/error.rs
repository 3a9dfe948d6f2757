/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Returned by `SplayTree::insert` when the key is already in the tree.
/// The tree is left untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("duplicate key")]
pub struct DuplicateKeyError;

/// Returned by `SplayTree::delete` on a tree without a root.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot delete from an empty tree")]
pub struct EmptyTreeError;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    DuplicateKey(#[from] DuplicateKeyError),

    #[error(transparent)]
    EmptyTree(#[from] EmptyTreeError),
}
