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

use lawsend_core::{Context, ProvideCredential, Result};

use crate::credential::Token;

/// StaticTokenProvider always hands out the same bearer token.
#[derive(Clone, Debug)]
pub struct StaticTokenProvider {
    token: Token,
}

impl StaticTokenProvider {
    /// Create a provider for a token that never expires.
    pub fn new(access_token: &str) -> Self {
        Self {
            token: Token::new(access_token, None),
        }
    }

    /// Create a provider for an existing token.
    pub fn with_token(token: Token) -> Self {
        Self { token }
    }
}

impl ProvideCredential for StaticTokenProvider {
    type Credential = Token;

    fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.token.clone()))
    }
}
