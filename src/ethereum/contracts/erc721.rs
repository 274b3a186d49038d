//! Devery product NFT bindings.

use alloy::sol;

// ERC721 with per-product minting limits
sol! {
    #[sol(rpc)]
    interface IDeveryERC721 {
        event Transfer(address indexed _from, address indexed _to, uint256 indexed _tokenId);
        event Approval(address indexed _owner, address indexed _approved, uint256 indexed _tokenId);
        event ApprovalForAll(address indexed _owner, address indexed _operator, bool _approved);

        function name() external view returns (string);
        function symbol() external view returns (string);
        function totalSupply() external view returns (uint256);
        function balanceOf(address _owner) external view returns (uint256);
        function ownerOf(uint256 _tokenId) external view returns (address);
        function tokenIdToProduct(uint256 tokenId) external view returns (address);
        function getProductsByOwner(address _owner) external view returns (address[]);
        function totalAllowedProducts(address product) external view returns (uint256);
        function totalMintedProducts(address product) external view returns (uint256);

        function claimProduct(address _productAddress, uint256 _quantity) external payable;
        function setMaximumMintableQuantity(address _productAddress, uint256 _quantity) external;
        function setDeveryRegistryAddress(address _deveryRegistryAddress) external;
        function safeTransferFrom(address _from, address _to, uint256 _tokenId) external payable;
        function approve(address _approved, uint256 _tokenId) external payable;
        function setApprovalForAll(address _operator, bool _approved) external;
    }
}
