//! Owned/Admined contract bindings.
//!
//! The registry inherits these entry points; any contract deployed from the
//! Devery `Admined` base exposes them.

use alloy::sol;

// Owned + Admined interface
sol! {
    #[sol(rpc)]
    interface IDeveryAdmined {
        event OwnershipTransferred(address indexed _from, address indexed _to);
        event AdminAdded(address indexed addr);
        event AdminRemoved(address indexed addr);

        function owner() external view returns (address);
        function newOwner() external view returns (address);
        function transferOwnership(address _newOwner) external;
        function acceptOwnership() external;

        function isAdmin(address addr) external view returns (bool);
        function addAdmin(address addr) external;
        function removeAdmin(address addr) external;
    }
}
