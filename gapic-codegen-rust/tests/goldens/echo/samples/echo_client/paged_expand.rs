// This file is @generated by gapic. Do not edit.
// This snippet has been automatically generated and should be regarded as a code template only.
// It will require modifications to work:
// - It may require correct/in-range values for request initialization.
// - It may require specifying an endpoint when creating the client.

// [START localhost_v1beta1_generated_echo_client_paged_expand]
use std::error::Error;

use google_showcase_v1beta1::EchoClient;
use google_showcase_v1beta1::model::PagedExpandRequest;

pub fn sample_paged_expand(client: &EchoClient) -> Result<(), Box<dyn Error>> {
    let request = PagedExpandRequest {
        content: "[CONTENT]".to_string(),
        ..Default::default()
    };
    for item in client.paged_expand(request) {
        let item = item?;
        println!("{item:?}");
    }
    Ok(())
}
// [END localhost_v1beta1_generated_echo_client_paged_expand]
