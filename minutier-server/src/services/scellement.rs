//! Content Sealing
//!
//! A deed's structured content is stored sealed: serialized to canonical
//! JSON, hashed (SHA-256, hex), then encrypted with a per-act AES-256-GCM
//! key. Unsealing is a single capability, decrypt then verify; there is no
//! way to get plaintext out without the digest check.

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Key, Nonce};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use rand::RngCore;
use sha2::{Digest, Sha256};
use shared::models::{ContenuActe, TypeCopie};
use thiserror::Error;
use zeroize::Zeroizing;

/// GCM nonce length; the nonce is prepended to the ciphertext blob
const NONCE_LEN: usize = 12;

#[derive(Debug, Error)]
pub enum ScellementError {
    /// Decryption failed or the recomputed digest differs from the stored
    /// one: the sealed content was tampered with or the key is wrong
    #[error("sealed content failed integrity verification")]
    Integrite,

    #[error("sealing failure: {0}")]
    Interne(String),
}

/// Output of sealing one content document
#[derive(Debug, Clone)]
pub struct ContenuScelle {
    /// nonce || AES-256-GCM ciphertext
    pub contenu_scelle: Vec<u8>,
    /// Hex SHA-256 over the canonical serialized plaintext
    pub hash_integrite: String,
    /// Per-act key, base64
    pub chiffrement_cle: String,
}

fn hash_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Seal deed content: canonical JSON, digest, fresh key, encrypt.
pub fn sceller(contenu: &ContenuActe) -> Result<ContenuScelle, ScellementError> {
    let plaintext = serde_json::to_vec(contenu).map_err(|e| ScellementError::Interne(e.to_string()))?;
    let hash_integrite = hash_hex(&plaintext);

    let mut key_bytes = Zeroizing::new([0u8; 32]);
    rand::thread_rng().fill_bytes(key_bytes.as_mut());
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key_bytes.as_ref()));

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let ciphertext = cipher
        .encrypt(&nonce, plaintext.as_slice())
        .map_err(|e| ScellementError::Interne(format!("encryption failed: {e}")))?;

    let mut contenu_scelle = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    contenu_scelle.extend_from_slice(&nonce);
    contenu_scelle.extend_from_slice(&ciphertext);

    Ok(ContenuScelle {
        contenu_scelle,
        hash_integrite,
        chiffrement_cle: B64.encode(key_bytes.as_ref()),
    })
}

/// Unseal deed content: decrypt, recompute the digest, compare against the
/// stored one, then parse. Any mismatch is `Integrite`.
pub fn desceller(
    contenu_scelle: &[u8],
    chiffrement_cle: &str,
    hash_attendu: &str,
) -> Result<ContenuActe, ScellementError> {
    if contenu_scelle.len() <= NONCE_LEN {
        return Err(ScellementError::Integrite);
    }
    let key_bytes = Zeroizing::new(
        B64.decode(chiffrement_cle)
            .map_err(|e| ScellementError::Interne(format!("invalid key encoding: {e}")))?,
    );
    if key_bytes.len() != 32 {
        return Err(ScellementError::Interne("invalid key length".into()));
    }

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key_bytes));
    let (nonce, ciphertext) = contenu_scelle.split_at(NONCE_LEN);
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| ScellementError::Integrite)?;

    if hash_hex(&plaintext) != hash_attendu {
        return Err(ScellementError::Integrite);
    }

    serde_json::from_slice(&plaintext).map_err(|e| ScellementError::Interne(e.to_string()))
}

/// Digest binding a copy to its source act: covers the source content hash,
/// the copy kind and the copy number, so a copy record cannot be re-pointed
/// at different content without detection.
pub fn hash_copie(hash_source: &str, type_copie: TypeCopie, numero_copie: i64) -> String {
    hash_hex(format!("{hash_source}:{}:{numero_copie}", type_copie.as_str()).as_bytes())
}
