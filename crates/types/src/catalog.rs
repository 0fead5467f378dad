// Path: crates/types/src/catalog.rs

/// Actions that only a privileged system account may execute.
pub const PRIVILEGED_ACTIONS: &[&str] = &[
    "eosio::addaction",
    "eosio::addlocked",
    "eosio::burnaction",
    "eosio::canceldelay",
    "eosio::crautoproxy",
    "eosio::incram",
    "eosio::inhibitunlck",
    "eosio::init",
    "eosio::newaccount",
    "eosio::onblock",
    "eosio::onerror",
    "eosio::remaction",
    "eosio::resetclaim",
    "eosio::rmvproducer",
    "eosio::setabi",
    "eosio::setautoproxy",
    "eosio::setcode",
    "eosio::setparams",
    "eosio::setpriv",
    "eosio::unlocktokens",
    "eosio::updatepower",
    "eosio::updlbpclaim",
    "eosio::updlocked",
    "eosio::updtrevision",
    "eosio.wrap::execute",
    "fio.address::bind2eosio",
    "fio.address::decrcounter",
    "fio.token::create",
    "fio.token::issue",
    "fio.token::mintfio",
    "fio.token::retire",
    "fio.token::transfer",
    "fio.tpid::rewardspaid",
    "fio.tpid::updatebounty",
    "fio.tpid::updatetpid",
    "fio.treasury::bppoolupdate",
    "fio.treasury::bprewdupdate",
    "fio.treasury::fdtnrwdupdat",
    "fio.treasury::startclock",
];

/// Actions that only a registered block producer may execute.
pub const PRODUCER_ACTIONS: &[&str] = &[
    "eosio::regproducer",
    "eosio::unregprod",
    "fio.address::burnexpired",
    "fio.fee::bundlevote",
    "fio.fee::bytemandfee",
    "fio.fee::createfee",
    "fio.fee::mandatoryfee",
    "fio.fee::setfeemult",
    "fio.fee::setfeevote",
    "fio.fee::updatefees",
    "fio.treasury::bpclaim",
];

fn key(contract: &str, action: &str) -> String {
    format!("{contract}::{action}")
}

/// Returns true if `contract::action` needs a privileged account.
pub fn is_privileged(contract: &str, action: &str) -> bool {
    PRIVILEGED_ACTIONS.contains(&key(contract, action).as_str())
}

/// Returns true if `contract::action` needs a producer account.
pub fn is_producer_only(contract: &str, action: &str) -> bool {
    PRODUCER_ACTIONS.contains(&key(contract, action).as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups() {
        assert!(is_privileged("eosio", "setcode"));
        assert!(!is_privileged("fio.token", "trnsfiopubky"));
        assert!(is_producer_only("fio.treasury", "bpclaim"));
    }
}
