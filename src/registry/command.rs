pub mod add_party_cmd;
pub mod get_all_parties_cmd;
pub mod get_party_cmd;
pub mod remove_party_cmd;
pub mod update_party_cmd;
