// This file is @generated by gapic. Do not edit.
// This snippet has been automatically generated and should be regarded as a code template only.
// It will require modifications to work:
// - It may require correct/in-range values for request initialization.
// - It may require specifying an endpoint when creating the client.

// [START localhost_v1beta1_generated_echo_client_expand_by_content_and_error]
use std::error::Error;

use gapic_gax::rpc::Status;
use google_showcase_v1beta1::EchoClient;

pub fn sample_expand_by_content_and_error(client: &EchoClient) -> Result<(), Box<dyn Error>> {
    let content = "[CONTENT]";
    let error = Status::default();
    for response in client.expand_by_content_and_error(content, error)? {
        let response = response?;
        println!("{response:?}");
    }
    Ok(())
}
// [END localhost_v1beta1_generated_echo_client_expand_by_content_and_error]
