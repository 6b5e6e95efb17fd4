use clap::Parser;

#[derive(Clone, Parser)]
pub struct HashPasswordParams {
    pub password: String,

    #[clap(long, default_value_t = bcrypt::DEFAULT_COST)]
    pub cost: u32,
}

pub fn hash_password(HashPasswordParams { password, cost }: HashPasswordParams) -> anyhow::Result<String> {
    Ok(bcrypt::hash(password, cost)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_against_original() {
        let hash = hash_password(HashPasswordParams {
            password: "securepass".into(),
            cost: 4,
        })
        .unwrap();

        assert!(bcrypt::verify("securepass", &hash).unwrap());
        assert!(!bcrypt::verify("123456", &hash).unwrap());
    }
}
