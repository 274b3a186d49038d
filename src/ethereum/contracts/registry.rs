//! Devery registry contract bindings.

use alloy::sol;

// Apps, brands, products, markers and item checks
sol! {
    #[sol(rpc)]
    interface IDeveryRegistry {
        event TokenUpdated(address indexed oldToken, address indexed newToken);
        event FeeAccountUpdated(address indexed oldFeeAccount, address indexed newFeeAccount);
        event FeeUpdated(uint oldFee, uint newFee);
        event AppAdded(address indexed appAccount, string appName, address feeAccount, uint fee, bool active);
        event AppUpdated(address indexed appAccount, string appName, address feeAccount, uint fee, bool active);
        event BrandAdded(address indexed brandAccount, address indexed appAccount, string brandName, bool active);
        event BrandUpdated(address indexed brandAccount, address indexed appAccount, string brandName, bool active);
        event ProductAdded(address indexed productAccount, address indexed brandAccount, address indexed appAccount, string description, bool active);
        event ProductUpdated(address indexed productAccount, address indexed brandAccount, address indexed appAccount, string description, bool active);
        event Permissioned(address indexed marker, address indexed brandAccount, bool permission);
        event Marked(address indexed marker, address indexed productAccount, address appFeeAccount, address feeAccount, uint appFee, uint fee, bytes32 itemHash);

        function token() external view returns (address);
        function feeAccount() external view returns (address);
        function fee() external view returns (uint);

        function setToken(address _token) external;
        function setFeeAccount(address _feeAccount) external;
        function setFee(uint _fee) external;

        function addApp(string appName, address _feeAccount, uint _fee) external;
        function updateApp(string appName, address _feeAccount, uint _fee, bool active) external;
        function getApp(address appAccount) external view returns (address _appAccount, string appName, address _feeAccount, uint _fee, bool active);
        function appAccountsLength() external view returns (uint);
        function appAccounts(uint index) external view returns (address);

        function addBrand(address brandAccount, string brandName) external;
        function updateBrand(address brandAccount, string brandName, bool active) external;
        function getBrand(address brandAccount) external view returns (address _brandAccount, address appAccount, string brandName, bool active);
        function getBrandData(address brandAccount) external view returns (address appAccount, address appFeeAccount, bool active);
        function brandAccountsLength() external view returns (uint);
        function brandAccounts(uint index) external view returns (address);

        function addProduct(address productAccount, string description, string details, uint year, string origin) external;
        function updateProduct(address productAccount, string description, string details, uint year, string origin, bool active) external;
        function getProduct(address productAccount) external view returns (address _productAccount, address brandAccount, string description, string details, uint year, string origin, bool active);
        function productAccountsLength() external view returns (uint);
        function productAccounts(uint index) external view returns (address);

        function permissionMarker(address marker, bool permission) external;
        function addressHash(address item) external pure returns (bytes32 hash);
        function mark(address productAccount, bytes32 itemHash) external;
        function check(address item) external view returns (address productAccount, address brandAccount, address appAccount);
    }
}
