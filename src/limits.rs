//! Size limit constants for input validation

/// Maximum length for a JWT token string (64KB)
pub(crate) const MAX_TOKEN_LENGTH: usize = 64 * 1024;

/// Maximum size for decoded JWT header JSON (8KB)
/// Headers are typically small (< 1KB), but we allow reasonable margin
pub(crate) const MAX_DECODED_HEADER_SIZE: usize = 8 * 1024;

/// Maximum size for decoded JWT payload JSON (64KB)
pub(crate) const MAX_DECODED_PAYLOAD_SIZE: usize = 64 * 1024;

/// Maximum size for decoded signature bytes (512 bytes)
/// An RSA signature is as long as the modulus, so this matches `MAX_RSA_BITS`
pub(crate) const MAX_DECODED_SIGNATURE_SIZE: usize = MAX_RSA_BITS / 8;

/// Maximum size for Base64URL-encoded signature string (1.5KB)
pub(crate) const MAX_SIGNATURE_B64_SIZE: usize = 1536;

/// Maximum length for algorithm (alg) field in JWT header (16 bytes)
pub(crate) const MAX_ALG_LENGTH: usize = 16;

/// Maximum clock skew tolerance (300 seconds = 5 minutes)
/// Prevents clock skew from effectively disabling expiration checks
pub(crate) const MAX_CLOCK_SKEW_SECONDS: u64 = 300;

/// Smallest RSA modulus accepted for key generation
pub(crate) const MIN_RSA_BITS: usize = 2048;

/// Largest RSA modulus accepted anywhere (the `rsa` crate's public key limit)
pub(crate) const MAX_RSA_BITS: usize = 4096;

/// Modulus size used by `keys::generate`
pub(crate) const DEFAULT_RSA_BITS: usize = 2048;
