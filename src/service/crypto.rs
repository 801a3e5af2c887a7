use sha3::{Sha3_256, Digest};

pub fn get_sha3_256_hash(data: &str) -> String {
   let mut hasher = Sha3_256::default();
   hasher.update(data.as_bytes());
   format!("{:X}", hasher.finalize())
}
