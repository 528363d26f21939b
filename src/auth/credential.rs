// BizGPT: Session Credentials
//
// HS256 JWTs signed with the process-wide signing secret. Expiry is checked
// against a caller-supplied clock so verification stays deterministic.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::atoms::constants::SESSION_TTL_SECS;
use crate::atoms::error::CredentialError;
use crate::atoms::types::{SessionClaims, SessionIdentity};

/// Signing and verification keys derived once from the signing secret.
#[derive(Clone)]
pub struct CredentialKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

/// A freshly minted credential together with what it encodes.
#[derive(Debug, Clone)]
pub struct IssuedCredential {
    pub token: String,
    pub claims: SessionClaims,
}

impl CredentialKeys {
    pub fn from_secret(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // `exp` is compared against the caller's clock in `verify`.
        validation.validate_exp = false;
        validation.leeway = 0;
        CredentialKeys {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign `identity` with `iat = now` and `exp = now + 6h`.
    pub fn mint(
        &self,
        identity: SessionIdentity,
        now: i64,
    ) -> Result<IssuedCredential, CredentialError> {
        let claims = SessionClaims {
            identity,
            iat: now,
            exp: now + SESSION_TTL_SECS,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(IssuedCredential { token, claims })
    }

    /// Check signature, then expiry. A token is expired once `now >= exp`.
    pub fn verify(&self, token: &str, now: i64) -> Result<SessionClaims, CredentialError> {
        let data = decode::<SessionClaims>(token, &self.decoding, &self.validation)?;
        let claims = data.claims;
        if now >= claims.exp {
            return Err(CredentialError::Expired { exp: claims.exp });
        }
        Ok(claims)
    }
}
