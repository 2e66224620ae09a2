// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use lawsend_core::time::{now, DateTime};
use lawsend_core::utils::Redact;
use lawsend_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Bearer token used to call Azure Resource Manager.
#[derive(Clone)]
pub struct Token {
    /// Access token.
    pub access_token: String,
    /// Expiration time for this token.
    pub expires_on: Option<DateTime>,
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &Redact::from(&self.access_token))
            .field("expires_on", &self.expires_on)
            .finish()
    }
}

impl SigningCredential for Token {
    fn is_valid(&self) -> bool {
        if self.access_token.is_empty() {
            return false;
        }
        // Take 20s as buffer to avoid edge cases
        match self.expires_on {
            Some(expires) => expires > now() + chrono::TimeDelta::try_seconds(20).expect("in bounds"),
            None => true,
        }
    }
}

impl Token {
    /// Create a new token.
    pub fn new(access_token: &str, expires_on: Option<DateTime>) -> Self {
        Self {
            access_token: access_token.to_string(),
            expires_on,
        }
    }

    /// Value of the `Authorization` header for this token.
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.access_token)
    }
}

/// Base64 encoded workspace shared key.
///
/// Lives only for one send operation and is never written anywhere.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedKey(String);

impl SharedKey {
    /// Wrap a base64 encoded shared key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The base64 text of this key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for SharedKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedKey").field(&Redact::from(&self.0)).finish()
    }
}
