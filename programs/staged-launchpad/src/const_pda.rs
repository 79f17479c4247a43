/// Program addresses known at compile time, so handlers can sign without re-deriving bumps.
pub mod const_authority {
    use anchor_lang::solana_program::pubkey::Pubkey;
    use const_crypto::ed25519;
    use cp_amm::constants::seeds::POOL_AUTHORITY_PREFIX;
    use crate::constants::VAULT_AUTHORITY;

    const AMM_POOL_AUTHORITY_AND_BUMP: ([u8; 32], u8) = ed25519::derive_program_address(
        &[POOL_AUTHORITY_PREFIX],
        &cp_amm::ID_CONST.to_bytes(),
    );

    /// Pool authority of the AMM program
    pub const AMM_POOL_AUTHORITY: Pubkey = Pubkey::new_from_array(AMM_POOL_AUTHORITY_AND_BUMP.0);

    const VAULT_AUTHORITY_AND_BUMP: ([u8; 32], u8) = ed25519::derive_program_address(
        &[VAULT_AUTHORITY],
        &crate::ID_CONST.to_bytes(),
    );

    /// Owner of every launch vault and of the seeded AMM positions
    pub const VAULT_AUTHORITY_KEY: Pubkey = Pubkey::new_from_array(VAULT_AUTHORITY_AND_BUMP.0);

    pub const VAULT_AUTHORITY_BUMP: u8 = VAULT_AUTHORITY_AND_BUMP.1;

    /// Signer seeds of the vault authority
    pub fn vault_authority_seeds() -> [&'static [u8]; 2] {
        const BUMP: &[u8] = &[VAULT_AUTHORITY_BUMP];
        [VAULT_AUTHORITY, BUMP]
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_vault_authority_matches_runtime_derivation() {
            let (key, bump) = Pubkey::find_program_address(&[VAULT_AUTHORITY], &crate::ID);
            assert_eq!(key, VAULT_AUTHORITY_KEY);
            assert_eq!(bump, VAULT_AUTHORITY_BUMP);
        }

        #[test]
        fn test_amm_pool_authority_matches_runtime_derivation() {
            let (key, _) = Pubkey::find_program_address(&[POOL_AUTHORITY_PREFIX], &cp_amm::ID);
            assert_eq!(key, AMM_POOL_AUTHORITY);
        }
    }
}
